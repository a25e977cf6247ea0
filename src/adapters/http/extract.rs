use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::app_error::AppError;

/// `Json<T>` whose rejections are reported as `AppError::InvalidInput`, so
/// malformed bodies get the same `{code, message}` shape as failed validation.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
