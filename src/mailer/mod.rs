//! Outbound mail seam for the contact form. The real delivery mechanism
//! is an external collaborator; everything here is a passthrough.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::MailConfig;

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail relay request failed: {0}")]
    Relay(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), MailError>;
}

/// Forwards contact messages to an HTTP mail relay.
pub struct WebhookMailer {
    http: reqwest::Client,
    endpoint: String,
    recipient: String,
}

impl WebhookMailer {
    pub fn new(endpoint: String, recipient: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            recipient,
        }
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), MailError> {
        let payload = serde_json::json!({
            "to": self.recipient,
            "reply_to": message.email,
            "subject": format!("Portfolio Contact: {}", message.name),
            "text": format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}",
                message.name, message.email, message.message
            ),
        });

        self.http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| MailError::Relay(e.to_string()))?;

        Ok(())
    }
}

/// Development fallback when no relay is configured: log and succeed,
/// so the contact form stays exercisable locally.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), MailError> {
        info!(
            from = %message.email,
            name = %message.name,
            "contact message received (no mail relay configured)"
        );
        Ok(())
    }
}

pub fn from_config(config: &MailConfig) -> Arc<dyn Mailer> {
    match &config.webhook_url {
        Some(url) => Arc::new(WebhookMailer::new(url.clone(), config.recipient.clone())),
        None => Arc::new(LogMailer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mailer = LogMailer;
        let message = ContactMessage {
            name: "A".into(),
            email: "a@example.com".into(),
            message: "hello".into(),
        };
        assert!(mailer.send_contact(&message).await.is_ok());
    }

    #[test]
    fn from_config_selects_webhook_when_configured() {
        let configured = MailConfig {
            recipient: "me@example.com".into(),
            webhook_url: Some("https://relay.example.com/send".into()),
        };
        // Just exercising the selection; no request is made here
        let _ = from_config(&configured);

        let unconfigured = MailConfig {
            recipient: "me@example.com".into(),
            webhook_url: None,
        };
        let _ = from_config(&unconfigured);
    }
}
