//! Email sender doubles.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::email::EmailSender,
};

#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Records every message instead of sending it.
#[derive(Default)]
pub struct CapturingEmailSender {
    emails: Mutex<Vec<CapturedEmail>>,
}

impl CapturingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured_emails(&self) -> Vec<CapturedEmail> {
        self.emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for CapturingEmailSender {
    async fn send(&self, to: &str, subject: &str, text: &str, html: &str) -> AppResult<()> {
        self.emails.lock().unwrap().push(CapturedEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

/// Always fails, like a provider returning 5xx.
#[derive(Default)]
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _to: &str, _subject: &str, _text: &str, _html: &str) -> AppResult<()> {
        Err(AppError::Internal("email provider unavailable".into()))
    }
}
