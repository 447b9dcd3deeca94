//! Home page route handler.

use axum::extract::{Query, State};
use tracing::instrument;

use super::FilterQuery;
use crate::presentation::{CartView, FilterControlsView, HomeTemplate, ProductView};
use crate::state::AppState;

/// Display the storefront: filter bar, matching products and the cart.
///
/// Filters given in the query string pre-select the controls, so a shared
/// link reproduces the same view.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> HomeTemplate {
    let criteria = query.criteria();
    let products = state
        .catalog()
        .filter(&criteria)
        .into_iter()
        .map(ProductView::from)
        .collect();

    let cart = {
        let store = state.cart();
        CartView::new(&store.entries(), &store.totals())
    };

    HomeTemplate {
        controls: FilterControlsView::from(&criteria),
        products,
        cart,
    }
}
