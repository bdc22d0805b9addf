//! Liveness probe for the ingestion service.
//!
//! `GET /health` answers without touching PostgreSQL: a request that reaches
//! the handler proves the HTTP layer is up, which is all orchestrators and CI
//! smoke checks need from this route. Database reachability is observable per
//! write on the `/data` path instead.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

// ---

async fn health() -> Json<Value> {
    // ---
    Json(json!({ "status": "ok" }))
}

/// Subrouter with the single `/health` route, generic over the gateway's
/// state type so it merges cleanly regardless of what the other routes carry.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // ---
    Router::new().route("/health", get(health))
}
