use sha2::{Digest, Sha256};

const FINGERPRINT_LEN: usize = 12;

/// Short, stable identifier for a token that is safe to put in logs.
pub fn token_fingerprint(token: &str) -> String {
    let hash = Sha256::digest(token.as_bytes());
    let mut hex = hex::encode(hash);
    hex.truncate(FINGERPRINT_LEN);
    hex
}
