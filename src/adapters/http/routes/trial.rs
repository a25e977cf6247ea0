use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Serialize;

use crate::{adapters::http::app_state::AppState, app_error::AppResult};

#[derive(Serialize)]
struct TrialTokenResponse {
    token: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/trial", post(create_trial_token))
}

/// POST /api/trial
async fn create_trial_token(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let token = app_state.trial_use_cases.create_token().await?;
    Ok(Json(TrialTokenResponse { token }))
}
