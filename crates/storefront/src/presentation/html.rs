//! HTML presenter for the HTTP storefront.
//!
//! Catalog and cart renders are HTMX fragments swapped into the page shell
//! rendered by [`HomeTemplate`].

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};
use vitrine_core::filter::{FilterCriteria, PriceBand, Selector, SortMode};
use vitrine_core::{CartEntry, CartTotals, Category, Product, Size};

use super::{CartView, Presenter, ProductView};
use crate::filters;

/// Renders catalog and cart state as HTML fragment responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPresenter;

impl Presenter for HtmlPresenter {
    type Output = Response;

    fn render_catalog(&self, products: &[&Product]) -> Response {
        ProductGridTemplate {
            products: products.iter().map(|p| ProductView::from(*p)).collect(),
        }
        .into_response()
    }

    fn render_cart(&self, entries: &[&CartEntry], totals: &CartTotals) -> Response {
        CartItemsTemplate {
            cart: CartView::new(entries, totals),
        }
        .into_response()
    }
}

/// One `<option>` of a filter control.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Current state of the filter form.
#[derive(Debug, Clone)]
pub struct FilterControlsView {
    pub search: String,
    pub categories: Vec<OptionView>,
    pub sizes: Vec<OptionView>,
    pub price_bands: Vec<OptionView>,
    pub sort_modes: Vec<OptionView>,
}

fn selector_options<T: Copy + PartialEq>(
    all: &[T],
    selected: &Selector<T>,
    value: impl Fn(T) -> &'static str,
    label: impl Fn(T) -> &'static str,
) -> Vec<OptionView> {
    all.iter()
        .map(|&option| OptionView {
            value: value(option),
            label: label(option),
            selected: matches!(selected, Selector::Exact(chosen) if *chosen == option),
        })
        .collect()
}

impl From<&FilterCriteria> for FilterControlsView {
    fn from(criteria: &FilterCriteria) -> Self {
        Self {
            search: criteria.search.clone(),
            categories: selector_options(
                &Category::ALL,
                &criteria.category,
                Category::label,
                Category::label,
            ),
            sizes: selector_options(&Size::ALL, &criteria.size, Size::label, Size::label),
            price_bands: selector_options(
                &PriceBand::ALL,
                &criteria.price,
                PriceBand::as_str,
                PriceBand::label,
            ),
            sort_modes: SortMode::ALL
                .into_iter()
                .map(|mode| OptionView {
                    value: mode.as_str(),
                    label: mode.label(),
                    selected: mode == criteria.sort,
                })
                .collect(),
        }
    }
}

/// Storefront page: filter bar, product grid and cart sidebar.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub controls: FilterControlsView,
    pub products: Vec<ProductView>,
    pub cart: CartView,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductView>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
    /// Play the badge pulse animation when the fragment is swapped in.
    pub pulse: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_core::{Cart, default_catalog};

    use super::*;

    fn selected(options: &[OptionView]) -> Vec<&'static str> {
        options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect()
    }

    #[test]
    fn test_filter_controls_mark_selected_options() {
        let criteria = FilterCriteria::from_controls("robe", "Robes", "all", "60-100", "desc");
        let view = FilterControlsView::from(&criteria);

        assert_eq!(view.search, "robe");
        assert_eq!(selected(&view.categories), vec!["Robes"]);
        assert!(selected(&view.sizes).is_empty());
        assert_eq!(selected(&view.price_bands), vec!["60-100"]);
        assert_eq!(selected(&view.sort_modes), vec!["desc"]);
    }

    #[test]
    fn test_product_grid_renders_cards() {
        let catalog = default_catalog();
        let html = ProductGridTemplate {
            products: catalog.iter().map(ProductView::from).collect(),
        }
        .render()
        .unwrap();

        assert!(html.contains("T-shirt oversize"));
        assert!(html.contains("25.00 €"));
        assert!(html.contains(r#"name="product_id" value="5""#));
        assert!(!html.contains("Aucun produit trouvé"));
    }

    #[test]
    fn test_empty_product_grid_shows_placeholder() {
        let html = ProductGridTemplate {
            products: Vec::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Aucun produit trouvé"));
    }

    #[test]
    fn test_empty_cart_renders_placeholder_and_zero_total() {
        let html = CartItemsTemplate {
            cart: CartView::empty(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Votre panier est vide"));
        assert!(html.contains("0.00 €"));
    }

    #[test]
    fn test_cart_lines_carry_their_index() {
        let catalog = default_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog[2]);
        cart.add(&catalog[0]);
        let entries: Vec<&CartEntry> = cart.entries().collect();

        let html = CartItemsTemplate {
            cart: CartView::new(&entries, &cart.totals()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Robe élégante"));
        assert!(html.contains(r#"name="index" value="1""#));
        assert!(html.contains("100.00 €"));
        assert!(!html.contains("Votre panier est vide"));
    }

    #[test]
    fn test_cart_count_pulse_class() {
        let html = CartCountTemplate {
            count: 3,
            pulse: true,
        }
        .render()
        .unwrap();
        assert!(html.contains("cart-badge"));
        assert!(html.contains('3'));

        let html = CartCountTemplate {
            count: 3,
            pulse: false,
        }
        .render()
        .unwrap();
        assert!(!html.contains("cart-badge"));
    }
}
