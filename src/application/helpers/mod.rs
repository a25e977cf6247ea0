pub mod token_fingerprint;
