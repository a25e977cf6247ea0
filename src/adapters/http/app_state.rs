use std::sync::Arc;

use crate::{
    application::{
        ports::kv_store::KvStore,
        use_cases::{approval::ApprovalUseCases, trial::TrialUseCases, waitlist::WaitlistUseCases},
    },
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
    pub approval_use_cases: Arc<ApprovalUseCases>,
    pub trial_use_cases: Arc<TrialUseCases>,
    pub store: Arc<dyn KvStore>,
}
