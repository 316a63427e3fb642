// tests/support/mocks/notifier.rs
use async_trait::async_trait;
use civiccare::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::notification::{Notifier, OutgoingMessage},
};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Records delivered messages; can be switched to fail every delivery.
#[derive(Debug, Default)]
pub struct CapturingNotifier {
    sent: Mutex<Vec<OutgoingMessage>>,
    attempts: AtomicUsize,
    failing: AtomicBool,
}

impl CapturingNotifier {
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.failing.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for CapturingNotifier {
    async fn deliver(&self, message: OutgoingMessage) -> ApplicationResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("mail relay unreachable"));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
