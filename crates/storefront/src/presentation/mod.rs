//! Presentation boundary.
//!
//! Catalog and cart state reach the shopper only through a [`Presenter`].
//! The store and the filter pipeline never know which surface is drawing
//! them: the HTTP storefront renders HTML fragments ([`HtmlPresenter`]), the
//! CLI renders plain text.
//!
//! The view types here are surface-agnostic display data, with prices
//! already formatted and cart lines carrying their display position.

mod html;

use vitrine_core::{CartEntry, CartTotals, Price, Product, ProductId};

pub use html::{
    CartCountTemplate, CartItemsTemplate, FilterControlsView, HomeTemplate, HtmlPresenter,
    OptionView, ProductGridTemplate,
};

/// Rendering capability for catalog and cart state.
pub trait Presenter {
    /// What a render produces (an HTTP response, a string, ...).
    type Output;

    /// Render the products currently shown. `products` may be empty, in which
    /// case the surface shows a "no results" placeholder.
    fn render_catalog(&self, products: &[&Product]) -> Self::Output;

    /// Render the cart lines in display order plus their totals.
    fn render_cart(&self, entries: &[&CartEntry], totals: &CartTotals) -> Self::Output;
}

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub category: &'static str,
    pub size: &'static str,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.label(),
            size: product.size.label(),
            price: product.unit_price().display(),
            image: product.image.clone(),
        }
    }
}

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    /// Display position, used by the line's buttons.
    pub index: usize,
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Build the view from cart lines in display order.
    #[must_use]
    pub fn new(entries: &[&CartEntry], totals: &CartTotals) -> Self {
        let items = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| CartItemView {
                index,
                id: entry.id(),
                name: entry.product.name.clone(),
                image: entry.product.image.clone(),
                quantity: entry.quantity,
                price: entry.product.unit_price().display(),
                line_price: entry.line_price().display(),
            })
            .collect();

        Self {
            items,
            total: totals.total_price().display(),
            item_count: totals.quantity,
        }
    }

    /// An empty cart with zero totals.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Price::eur(rust_decimal::Decimal::ZERO).display(),
            item_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::{Cart, default_catalog};

    use super::*;

    #[test]
    fn test_cart_view_numbers_lines_in_display_order() {
        let catalog = default_catalog();
        let mut cart = Cart::new();
        for product in catalog.iter().rev().take(2) {
            cart.add(product);
        }
        cart.add(&catalog[4]);

        let entries: Vec<&CartEntry> = cart.entries().collect();
        let view = CartView::new(&entries, &cart.totals());

        let lines: Vec<(usize, i32, u32)> = view
            .items
            .iter()
            .map(|item| (item.index, item.id.as_i32(), item.quantity))
            .collect();
        assert_eq!(lines, vec![(0, 5, 2), (1, 4, 1)]);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "120.00 €");
        assert_eq!(view.items[0].line_price, "60.00 €");
    }

    #[test]
    fn test_empty_cart_view_shows_zero_total() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.total, "0.00 €");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_product_view_formats_price_and_labels() {
        let view = ProductView::from(&default_catalog()[1]);
        assert_eq!(view.name, "Pantalon slim");
        assert_eq!(view.category, "Pantalons");
        assert_eq!(view.size, "L");
        assert_eq!(view.price, "45.00 €");
    }
}
