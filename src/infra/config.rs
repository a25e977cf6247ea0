use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;

use crate::domain::entities::store_error_policy::StoreErrorPolicy;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub redis_url: String,
    /// Key holding the serialized waitlist.
    pub waitlist_key: String,
    pub store_error_policy: StoreErrorPolicy,
    pub cors_origin: HeaderValue,
    /// Approval emails are only sent when this is set.
    pub resend_api_key: Option<SecretString>,
    pub email_from: String,
    pub trial_email_domain: String,
    pub trial_monthly_limit: i64,
    pub trial_ttl_hours: u64,
    /// Optional path for structured JSON logs, in addition to the console.
    pub log_json_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "0.0.0.0:3000".parse().unwrap());
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());
        let waitlist_key: String = get_env_default("WAITLIST_KEY", "waitlist".to_string());
        let store_error_policy: StoreErrorPolicy =
            get_env_default("STORE_ERROR_POLICY", String::from("strict"))
                .parse()
                .expect("STORE_ERROR_POLICY must be 'strict' or 'lenient'");
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let resend_api_key: Option<SecretString> = std::env::var("RESEND_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(key.into()));
        let email_from: String = if resend_api_key.is_some() {
            get_env("EMAIL_FROM")
        } else {
            get_env_default("EMAIL_FROM", String::new())
        };

        let trial_email_domain: String =
            get_env_default("TRIAL_EMAIL_DOMAIN", "trial.localhost".to_string());
        let trial_monthly_limit: i64 = get_env_default("TRIAL_MONTHLY_LIMIT", 10);
        let trial_ttl_hours: u64 = get_env_default("TRIAL_TTL_HOURS", 24);
        let log_json_path: Option<String> = std::env::var("LOG_JSON_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty());

        Self {
            bind_addr,
            redis_url,
            waitlist_key,
            store_error_policy,
            cors_origin,
            resend_api_key,
            email_from,
            trial_email_domain,
            trial_monthly_limit,
            trial_ttl_hours,
            log_json_path,
        }
    }

    pub fn trial_ttl_secs(&self) -> u64 {
        self.trial_ttl_hours.max(1) * 60 * 60
    }
}
