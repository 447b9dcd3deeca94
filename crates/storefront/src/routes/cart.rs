//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each mutation answers with the fragment its form targets and raises an
//! `HX-Trigger` event so the other cart fragment refreshes itself:
//!
//! - add answers with the badge and raises `cart-updated` for the lines
//! - update, remove and clear answer with the lines and raise
//!   `cart-count-changed` for the badge

use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;
use vitrine_core::ProductId;

use crate::error::{Result, add_breadcrumb};
use crate::presentation::{CartCountTemplate, HtmlPresenter};
use crate::state::AppState;

/// Event refreshing the cart lines fragment.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Event refreshing the cart count badge.
pub const CART_COUNT_CHANGED_EVENT: &str = "cart-count-changed";

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Quantity change form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    pub delta: i32,
}

/// Line removal form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Cart lines and total fragment (HTMX).
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Response {
    state.cart().render(&HtmlPresenter)
}

/// Cart count badge fragment (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> CartCountTemplate {
    CartCountTemplate {
        count: state.cart().totals().quantity,
        pulse: false,
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// Returns the count badge, pulsing when the cart changed.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);

    let (changed, count) = {
        let mut store = state.cart();
        let changed = store.add_to_cart(id)?;
        (changed, store.totals().quantity)
    };

    if changed {
        let product_id = id.to_string();
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
    }

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate {
            count,
            pulse: changed,
        },
    )
        .into_response())
}

/// Change the quantity of a cart line (HTMX).
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let fragment = {
        let mut store = state.cart();
        store.change_qty(form.index, form.delta)?;
        store.render(&HtmlPresenter)
    };

    Ok(with_count_trigger(fragment))
}

/// Remove a cart line (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let fragment = {
        let mut store = state.cart();
        store.remove_from_cart(form.index)?;
        store.render(&HtmlPresenter)
    };

    Ok(with_count_trigger(fragment))
}

/// Empty the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Response> {
    let fragment = {
        let mut store = state.cart();
        store.clear()?;
        store.render(&HtmlPresenter)
    };

    add_breadcrumb("cart", "Cleared cart", None);
    Ok(with_count_trigger(fragment))
}

fn with_count_trigger(fragment: Response) -> Response {
    (
        AppendHeaders([("HX-Trigger", CART_COUNT_CHANGED_EVENT)]),
        fragment,
    )
        .into_response()
}
