use serde::{Deserialize, Serialize};

/// A pending registration as it is stored inside the waitlist blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub building: String,
    pub calls: i64,
}

impl User {
    /// Case-insensitive, including non-ASCII letters.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().to_lowercase() == email.trim().to_lowercase()
    }
}

/// Users are identified by email alone, compared case-insensitively.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.has_email(&other.email)
    }
}

impl Eq for User {}
