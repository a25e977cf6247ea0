use std::sync::Arc;

use rand::{Rng, distributions::Alphanumeric};
use tracing::{info, instrument};

use crate::{
    app_error::AppResult,
    application::{helpers::token_fingerprint::token_fingerprint, ports::kv_store::KvStore},
    domain::entities::registered_user::RegisteredUser,
};

pub const TRIAL_TOKEN_PREFIX: &str = "TRIAL-";
const TRIAL_TOKEN_LEN: usize = 64;
const TRIAL_EMAIL_RANDOM_LEN: usize = 20;

/// Issues short-lived tokens that bypass the waitlist.
#[derive(Clone)]
pub struct TrialUseCases {
    store: Arc<dyn KvStore>,
    email_domain: String,
    monthly_limit: i64,
    ttl_secs: u64,
}

impl TrialUseCases {
    pub fn new(
        store: Arc<dyn KvStore>,
        email_domain: String,
        monthly_limit: i64,
        ttl_secs: u64,
    ) -> Self {
        Self {
            store,
            email_domain,
            monthly_limit,
            ttl_secs,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_token(&self) -> AppResult<String> {
        let token = format!(
            "{}{}",
            TRIAL_TOKEN_PREFIX,
            random_string(TRIAL_TOKEN_LEN - TRIAL_TOKEN_PREFIX.len())
        );
        let user_email = format!(
            "trial-{}@{}",
            random_string(TRIAL_EMAIL_RANDOM_LEN).to_lowercase(),
            self.email_domain
        );

        let record = RegisteredUser::approved(user_email, self.monthly_limit);
        let payload = serde_json::to_string(&record)?;
        self.store
            .put_with_ttl(&token, &payload, self.ttl_secs)
            .await?;

        info!(token = %token_fingerprint(&token), ttl_secs = self.ttl_secs, "Trial token issued");
        Ok(token)
    }
}

fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
