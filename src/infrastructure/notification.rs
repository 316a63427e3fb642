// src/infrastructure/notification.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::notification::{Notifier, OutgoingMessage},
};
use async_trait::async_trait;
use tracing::{debug, info};

/// Outbox that records composed messages in the log instead of talking to SMTP.
#[derive(Debug, Clone)]
pub struct LoggingNotifier {
    sender: String,
    enabled: bool,
}

impl LoggingNotifier {
    pub fn new(sender: impl Into<String>, enabled: bool) -> Self {
        Self {
            sender: sender.into(),
            enabled,
        }
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn deliver(&self, message: OutgoingMessage) -> ApplicationResult<()> {
        if !self.enabled {
            debug!(recipient = %message.recipient, "notifications disabled, message dropped");
            return Ok(());
        }
        if message.recipient.trim().is_empty() {
            return Err(ApplicationError::validation("notification recipient is empty"));
        }

        info!(
            from = %self.sender,
            to = %message.recipient,
            subject = %message.subject,
            body = %message.body,
            "notification queued"
        );
        Ok(())
    }
}
