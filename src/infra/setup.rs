use crate::{
    adapters::{
        email::resend::{DisabledEmailSender, ResendEmailSender},
        http::app_state::AppState,
    },
    application::{
        ports::{email::EmailSender, kv_store::KvStore},
        use_cases::{approval::ApprovalUseCases, trial::TrialUseCases, waitlist::WaitlistUseCases},
    },
    infra::{InfraError, config::AppConfig, redis_store::RedisKvStore},
};
use std::fs::File;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    init_tracing(config.log_json_path.as_deref())?;

    let store = Arc::new(RedisKvStore::new(&config.redis_url).await?) as Arc<dyn KvStore>;

    let email: Arc<dyn EmailSender> = match &config.resend_api_key {
        Some(api_key) => Arc::new(ResendEmailSender::new(
            api_key.clone(),
            config.email_from.clone(),
        )),
        None => {
            info!("RESEND_API_KEY not set, approval emails are disabled");
            Arc::new(DisabledEmailSender)
        }
    };

    let waitlist_use_cases = Arc::new(WaitlistUseCases::new(
        store.clone(),
        config.waitlist_key.clone(),
        config.store_error_policy,
    ));

    let approval_use_cases = ApprovalUseCases::new(
        store.clone(),
        waitlist_use_cases.clone(),
        email,
        config.store_error_policy,
    );

    let trial_use_cases = TrialUseCases::new(
        store.clone(),
        config.trial_email_domain.clone(),
        config.trial_monthly_limit,
        config.trial_ttl_secs(),
    );

    info!(
        waitlist_key = %config.waitlist_key,
        store_error_policy = %config.store_error_policy,
        "Application state initialized"
    );

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases,
        approval_use_cases: Arc::new(approval_use_cases),
        trial_use_cases: Arc::new(trial_use_cases),
        store,
    })
}

pub fn init_tracing(log_json_path: Option<&str>) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist_gateway=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), only when a path is configured
    let json_layer = match log_json_path {
        Some(path) => {
            let file = File::create(path).map_err(InfraError::LogFile)?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
