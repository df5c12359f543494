use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::about::models::AboutSection;
use crate::state::AppState;

/// GET /health
/// Reports service version and whether the backing store answers a read.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let storage_ok = match state.store.get(AboutSection::AboutMe.storage_key()).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Health check storage read failed: {e}");
            false
        }
    };
    let (status, label) = if storage_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(json!({
            "status": label,
            "version": env!("CARGO_PKG_VERSION"),
            "service": "portfolio-api",
            "storage": format!("{:?}", state.config.storage_backend).to_lowercase(),
        })),
    )
}
