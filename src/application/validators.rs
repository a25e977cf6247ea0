use validator::ValidateEmail;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{
        user::User,
        user_token::{RevokeRequest, UserToken},
    },
};

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Trims a registration and rejects it if any field is unusable.
pub fn normalize_registration(mut user: User) -> AppResult<User> {
    user.name = user.name.trim().to_string();
    user.email = user.email.trim().to_string();
    user.building = user.building.trim().to_string();

    if user.name.is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".into()));
    }
    if !is_valid_email(&user.email) {
        return Err(AppError::InvalidInput("Invalid email format".into()));
    }
    if user.building.is_empty() {
        return Err(AppError::InvalidInput("building must not be empty".into()));
    }
    if user.calls < 0 {
        return Err(AppError::InvalidInput("calls must not be negative".into()));
    }

    Ok(user)
}

pub fn normalize_user_token(mut user_token: UserToken) -> AppResult<UserToken> {
    user_token.email = user_token.email.trim().to_string();
    user_token.token = user_token.token.trim().to_string();

    if !is_valid_email(&user_token.email) {
        return Err(AppError::InvalidInput("Invalid email format".into()));
    }
    if user_token.token.is_empty() {
        return Err(AppError::InvalidInput("token must not be empty".into()));
    }
    if user_token.limit < 0 {
        return Err(AppError::InvalidInput("limit must not be negative".into()));
    }

    Ok(user_token)
}

pub fn normalize_revoke_request(mut request: RevokeRequest) -> AppResult<RevokeRequest> {
    request.token = request.token.trim().to_string();

    if request.token.is_empty() {
        return Err(AppError::InvalidInput("token must not be empty".into()));
    }

    Ok(request)
}
