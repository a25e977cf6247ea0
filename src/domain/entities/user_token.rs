use serde::{Deserialize, Serialize};

/// Operator input for approving a waitlisted user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserToken {
    pub email: String,
    pub token: String,
    pub limit: i64,
}

/// Operator input for revoking an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeRequest {
    pub token: String,
}
