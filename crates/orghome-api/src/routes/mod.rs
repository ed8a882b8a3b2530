//! HTTP routes.

pub mod health;
pub mod org;

use crate::AppState;
use axum::Router;

/// Build the main router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(org::router())
        .with_state(state)
}
