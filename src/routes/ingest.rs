use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde_json::json;
use tracing::{debug, error, info};

use crate::{db, Config, Reading};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/data", post(handler))
}

/// Handle `POST /data`.
///
/// Body validation happens in the `Json` extractor: a payload missing any
/// required field never reaches this function (axum answers 422 on its own).
/// The persistence outcome decides the response status; a failed write is
/// reported to the client rather than acknowledged as success.
async fn handler(
    State(config): State<Config>,
    Json(payload): Json<Reading>,
) -> impl IntoResponse {
    // ---
    info!("POST /data - received reading for '{}'", payload.name);
    debug!("POST /data - payload: {:?}", payload);

    if let Err(e) = db::insert_reading(&config, &payload).await {
        error!("Failed to store reading: {}", e);
        return e.into_response();
    }

    debug!("POST /data - stored, returning OK");

    // Echo the payload exactly as received; rounding applies only to the row.
    (
        StatusCode::OK,
        Json(json!({ "status": "success", "received": payload })),
    )
        .into_response()
}
