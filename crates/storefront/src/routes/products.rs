//! Product grid route handler.

use axum::{
    extract::{Query, State},
    response::Response,
};
use tracing::instrument;

use super::FilterQuery;
use crate::presentation::HtmlPresenter;
use crate::state::AppState;

/// Product grid fragment for the current filter controls (HTMX).
#[instrument(skip(state))]
pub async fn grid(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> Response {
    let criteria = query.criteria();
    state.catalog().render(&criteria, &HtmlPresenter)
}
