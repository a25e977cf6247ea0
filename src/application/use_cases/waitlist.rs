use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::kv_store::KvStore,
        use_cases::store_access::{decode_or_warn, read_value},
    },
    domain::entities::{store_error_policy::StoreErrorPolicy, user::User},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    Duplicate,
}

/// The waitlist as read from the store, plus the raw payload it came from so
/// the write-back can be conditional on nothing having changed.
struct WaitlistSnapshot {
    raw: Option<String>,
    users: Vec<User>,
}

/// Pending registrations, kept as a single JSON array under one key.
///
/// Read-modify-write cycles hold `write_lock` and write back with a
/// compare-and-swap against the payload that was read. Losing the swap to
/// another process yields `AppError::Conflict`.
#[derive(Clone)]
pub struct WaitlistUseCases {
    store: Arc<dyn KvStore>,
    waitlist_key: String,
    policy: StoreErrorPolicy,
    write_lock: Arc<Mutex<()>>,
}

impl WaitlistUseCases {
    pub fn new(store: Arc<dyn KvStore>, waitlist_key: String, policy: StoreErrorPolicy) -> Self {
        Self {
            store,
            waitlist_key,
            policy,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: User) -> AppResult<RegisterOutcome> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.load().await?;

        if snapshot.users.iter().any(|existing| *existing == user) {
            info!("Email already on the waitlist");
            return Ok(RegisterOutcome::Duplicate);
        }

        let mut users = snapshot.users.clone();
        users.push(user);
        self.persist(&snapshot, &users).await?;

        info!(size = users.len(), "User added to the waitlist");
        Ok(RegisterOutcome::Created)
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.load().await?.users)
    }

    /// Removes every entry matching `email` (case-insensitive) and returns the
    /// first one. Nothing is written when there is no match.
    #[instrument(skip(self))]
    pub async fn remove(&self, email: &str) -> AppResult<Option<User>> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.load().await?;

        let (matched, remaining): (Vec<User>, Vec<User>) = snapshot
            .users
            .iter()
            .cloned()
            .partition(|user| user.has_email(email));

        let Some(removed) = matched.into_iter().next() else {
            return Ok(None);
        };

        self.persist(&snapshot, &remaining).await?;

        info!(size = remaining.len(), "User removed from the waitlist");
        Ok(Some(removed))
    }

    async fn load(&self) -> AppResult<WaitlistSnapshot> {
        let raw = read_value(
            self.store.as_ref(),
            &self.waitlist_key,
            &self.waitlist_key,
            self.policy,
        )
        .await?;

        let users = raw
            .as_deref()
            .and_then(|raw| decode_or_warn::<Vec<User>>(raw, &self.waitlist_key))
            .unwrap_or_default();

        Ok(WaitlistSnapshot { raw, users })
    }

    async fn persist(&self, snapshot: &WaitlistSnapshot, users: &[User]) -> AppResult<()> {
        let payload = serde_json::to_string(users)?;

        let swapped = self
            .store
            .compare_and_swap(&self.waitlist_key, snapshot.raw.as_deref(), &payload)
            .await?;

        if !swapped {
            warn!(
                key = %self.waitlist_key,
                "Waitlist changed by another writer, update rejected"
            );
            return Err(AppError::Conflict(
                "waitlist was modified concurrently".into(),
            ));
        }

        Ok(())
    }
}
