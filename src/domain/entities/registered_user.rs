use serde::{Deserialize, Serialize};

/// Record stored under an issued token.
///
/// Older writers used PascalCase field names (`UserEmail`, `MonthlyLimit`,
/// `Revoked`); those still decode. `monthly_limit` is absent on records that
/// never carried a quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    #[serde(alias = "UserEmail")]
    pub user_email: String,
    #[serde(
        default,
        alias = "MonthlyLimit",
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_limit: Option<i64>,
    #[serde(default, alias = "Revoked")]
    pub revoked: bool,
}

impl RegisteredUser {
    pub fn approved(user_email: impl Into<String>, monthly_limit: i64) -> Self {
        Self {
            user_email: user_email.into(),
            monthly_limit: Some(monthly_limit),
            revoked: false,
        }
    }

    pub fn revoke(&mut self) {
        self.revoked = true;
    }
}
