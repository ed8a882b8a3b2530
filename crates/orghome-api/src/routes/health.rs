//! Health check endpoint.
//!
//! Served under `/-/` so it never shadows an organization's home page.

use axum::Json;
use axum::Router;
use axum::routing::get;
use serde_json::{Value, json};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/-/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
