//! Test data factories.
//!
//! Each factory returns a valid object; the closure overrides fields.

use crate::domain::entities::{user::User, user_token::UserToken};

/// Create a waitlist registration with sensible defaults.
pub fn create_test_user(overrides: impl FnOnce(&mut User)) -> User {
    let mut user = User {
        name: "Test User".to_string(),
        email: "user@example.com".to_string(),
        building: "Main Building".to_string(),
        calls: 100,
    };
    overrides(&mut user);
    user
}

/// Create an approval request with sensible defaults.
pub fn create_test_user_token(overrides: impl FnOnce(&mut UserToken)) -> UserToken {
    let mut user_token = UserToken {
        email: "user@example.com".to_string(),
        token: "test-token".to_string(),
        limit: 100,
    };
    overrides(&mut user_token);
    user_token
}
