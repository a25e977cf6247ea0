pub mod registration;
pub mod status;
pub mod trial;

use axum::Router;

use crate::adapters::http::app_state::AppState;

/// Routes mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(registration::router())
        .merge(trial::router())
}
