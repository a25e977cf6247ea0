use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::{
    adapters::http::app_state::AppState, app_error::AppResult,
    application::ports::kv_store::StoreStatus,
};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: StoreStatus,
}

/// Mounted at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

/// GET /healthz
async fn healthz(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let store = app_state.store.status().await?;
    Ok(Json(HealthResponse { status: "ok", store }))
}
