use axum::Router;

use crate::Config;

mod health;
mod ingest;

// ---

pub fn router(config: Config) -> Router {
    // ---
    Router::new()
        .merge(ingest::router())
        .merge(health::router())
        .with_state(config)
}
