// src/application/ports/notification.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

/// A composed message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Best-effort delivery. Callers log and drop failures.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, message: OutgoingMessage) -> ApplicationResult<()>;
}
