use async_trait::async_trait;

use crate::app_error::AppResult;

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, text: &str, html: &str) -> AppResult<()>;
}
