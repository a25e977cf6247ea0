use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        email_templates::approval_email,
        helpers::token_fingerprint::token_fingerprint,
        ports::{email::EmailSender, kv_store::KvStore},
        use_cases::{
            store_access::{decode_or_warn, read_value},
            waitlist::WaitlistUseCases,
        },
    },
    domain::entities::{
        registered_user::RegisteredUser, store_error_policy::StoreErrorPolicy, user::User,
        user_token::UserToken,
    },
};

/// Moves users from the waitlist to per-token records and revokes them.
#[derive(Clone)]
pub struct ApprovalUseCases {
    store: Arc<dyn KvStore>,
    waitlist: Arc<WaitlistUseCases>,
    email: Arc<dyn EmailSender>,
    policy: StoreErrorPolicy,
}

impl ApprovalUseCases {
    pub fn new(
        store: Arc<dyn KvStore>,
        waitlist: Arc<WaitlistUseCases>,
        email: Arc<dyn EmailSender>,
        policy: StoreErrorPolicy,
    ) -> Self {
        Self {
            store,
            waitlist,
            email,
            policy,
        }
    }

    /// Removes the user from the waitlist and writes a fresh record under the
    /// token, overwriting whatever was there. If the record cannot be written
    /// the user is put back on the waitlist.
    #[instrument(skip(self, user_token), fields(email = %user_token.email, token = %token_fingerprint(&user_token.token)))]
    pub async fn approve(&self, user_token: &UserToken) -> AppResult<RegisteredUser> {
        let Some(user) = self.waitlist.remove(&user_token.email).await? else {
            info!("Email not on the waitlist");
            return Err(AppError::NotFound);
        };

        let record = RegisteredUser::approved(user.email.clone(), user_token.limit);
        let payload = serde_json::to_string(&record)?;

        if let Err(err) = self.store.put(&user_token.token, &payload).await {
            error!(error = ?err, "Token record write failed, restoring waitlist entry");
            self.restore_waitlist_entry(user).await;
            return Err(err);
        }

        info!("User approved");
        self.notify_approved(&user, &user_token.token).await;

        Ok(record)
    }

    /// Flips `revoked` on an existing record. The key is left in place.
    #[instrument(skip_all, fields(token = %token_fingerprint(token)))]
    pub async fn revoke(&self, token: &str) -> AppResult<RegisteredUser> {
        let Some(mut record) = self.lookup(token).await? else {
            info!("Unknown token");
            return Err(AppError::NotFound);
        };

        record.revoke();
        let payload = serde_json::to_string(&record)?;
        self.store.put(token, &payload).await?;

        info!("Token revoked");
        Ok(record)
    }

    /// Whether any record is stored under `token`. Revoked records count as
    /// approved here; use `lookup` to inspect the flag.
    pub async fn is_approved(&self, token: &str) -> AppResult<bool> {
        let raw = read_value(
            self.store.as_ref(),
            &token_fingerprint(token),
            token,
            self.policy,
        )
        .await?;
        Ok(raw.is_some())
    }

    /// Decoded record for `token`, or `None` if absent or undecodable.
    pub async fn lookup(&self, token: &str) -> AppResult<Option<RegisteredUser>> {
        let label = token_fingerprint(token);
        let raw = read_value(self.store.as_ref(), &label, token, self.policy).await?;

        Ok(raw
            .as_deref()
            .and_then(|raw| decode_or_warn::<RegisteredUser>(raw, &label)))
    }

    async fn restore_waitlist_entry(&self, user: User) {
        match self.waitlist.register(user.clone()).await {
            Ok(_) => info!("Waitlist entry restored"),
            Err(err) => {
                error!(error = ?err, user = ?user, "Waitlist entry could not be restored");
            }
        }
    }

    async fn notify_approved(&self, user: &User, token: &str) {
        let (subject, text, html) = approval_email(&user.name, token);
        if let Err(err) = self.email.send(&user.email, &subject, &text, &html).await {
            warn!(error = %err, "Approval email could not be sent");
        }
    }
}
