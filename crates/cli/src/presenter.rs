//! Plain-text rendering of catalog and cart state.

use std::fmt::Write as _;

use vitrine_core::{CartEntry, CartTotals, Product};
use vitrine_storefront::presentation::{CartView, Presenter, ProductView};

/// Renders catalog and cart state as aligned terminal text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    type Output = String;

    fn render_catalog(&self, products: &[&Product]) -> String {
        if products.is_empty() {
            return "Aucun produit trouvé\n".to_string();
        }

        let mut out = String::new();
        for view in products.iter().map(|p| ProductView::from(*p)) {
            let _ = writeln!(
                out,
                "{:>4}  {:<24} {:<10} {:<3} {:>10}",
                view.id.as_i32(), view.name, view.category, view.size, view.price
            );
        }
        out
    }

    fn render_cart(&self, entries: &[&CartEntry], totals: &CartTotals) -> String {
        let view = CartView::new(entries, totals);
        let mut out = String::new();

        if view.is_empty() {
            out.push_str("Votre panier est vide\n");
        }
        for item in &view.items {
            let _ = writeln!(
                out,
                "[{}] {:<24} {:>10} x{:<3} {:>10}",
                item.index, item.name, item.price, item.quantity, item.line_price
            );
        }
        let _ = writeln!(out, "Total: {} ({} articles)", view.total, view.item_count);
        out
    }
}
