//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page (filters from the query string)
//! GET  /health                 - Health check
//! GET  /static/*               - Stylesheets and product images
//!
//! # Catalog (HTMX fragments)
//! GET  /products               - Product grid for ?search=&category=&size=&price=&sort=
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart lines and total
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add one unit (returns pulsing badge, triggers cart-updated)
//! POST /cart/update            - Change a line quantity by delta (returns cart lines)
//! POST /cart/remove            - Remove a line (returns cart lines)
//! POST /cart/clear             - Empty the cart (returns cart lines)
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use vitrine_core::FilterCriteria;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Filter controls as sent by the filter form.
///
/// Missing fields take their neutral value ("all", no search, catalog order).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    pub search: String,
    pub category: String,
    pub size: String,
    pub price: String,
    pub sort: String,
}

impl FilterQuery {
    /// Criteria selected by these controls.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_controls(
            &self.search,
            &self.category,
            &self.size,
            &self.price,
            &self.sort,
        )
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::grid))
        .nest("/cart", cart_routes())
}

/// Build the complete application: routes, static files, middleware and state.
///
/// Sentry layers are added by the binary on top of this router.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", static_dir)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
