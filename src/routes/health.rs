use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Service is alive")),
)]
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.config.gemini_model,
    });
    (StatusCode::OK, Json(body))
}
