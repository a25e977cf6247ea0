/// How read paths treat an unreachable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreErrorPolicy {
    /// Store failures surface as `AppError::StoreUnavailable`.
    #[default]
    Strict,
    /// Store failures on reads are logged and treated as an absent key.
    Lenient,
}

impl StoreErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreErrorPolicy::Strict => "strict",
            StoreErrorPolicy::Lenient => "lenient",
        }
    }

    pub fn is_lenient(&self) -> bool {
        matches!(self, StoreErrorPolicy::Lenient)
    }
}

impl std::fmt::Display for StoreErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StoreErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(StoreErrorPolicy::Strict),
            "lenient" => Ok(StoreErrorPolicy::Lenient),
            _ => Err(format!(
                "Invalid store error policy: {}. Must be 'strict' or 'lenient'",
                s
            )),
        }
    }
}
