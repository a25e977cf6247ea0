use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::{
    adapters::http::{app_state::AppState, extract::AppJson},
    app_error::AppResult,
    application::{
        use_cases::waitlist::RegisterOutcome,
        validators::{normalize_registration, normalize_revoke_request, normalize_user_token},
    },
    domain::entities::{
        user::User,
        user_token::{RevokeRequest, UserToken},
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/pending", get(pending))
        .route("/approve", put(approve))
        .route("/revoke", put(revoke))
}

/// POST /api/register
/// 201 with the stored record, or 202 when the email is already waiting.
async fn register(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<User>,
) -> AppResult<impl IntoResponse> {
    let user = normalize_registration(payload)?;

    let outcome = app_state
        .waitlist_use_cases
        .register(user.clone())
        .await?;

    let status = match outcome {
        RegisterOutcome::Created => StatusCode::CREATED,
        RegisterOutcome::Duplicate => StatusCode::ACCEPTED,
    };

    Ok((status, Json(user)))
}

/// GET /api/pending
async fn pending(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users: Vec<User> = app_state.waitlist_use_cases.list().await?;
    Ok(Json(users))
}

/// PUT /api/approve
async fn approve(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<UserToken>,
) -> AppResult<impl IntoResponse> {
    let user_token = normalize_user_token(payload)?;

    let record = app_state.approval_use_cases.approve(&user_token).await?;

    Ok(Json(record))
}

/// PUT /api/revoke
/// 404 when no decodable record exists under the token.
async fn revoke(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<RevokeRequest>,
) -> AppResult<impl IntoResponse> {
    let request = normalize_revoke_request(payload)?;

    let record = app_state.approval_use_cases.revoke(&request.token).await?;

    Ok(Json(record))
}
