pub mod registered_user;
pub mod store_error_policy;
pub mod user;
pub mod user_token;
