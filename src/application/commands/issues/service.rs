// src/application/commands/issues/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::ApplicationResult,
        ports::{
            notification::{Notifier, OutgoingMessage},
            storage::{ImageKind, ImageStore, UploadedImage},
            time::Clock,
        },
    },
    domain::{
        feedback::FeedbackRepository,
        issue::{ImageRef, IssueReadRepository, IssueWriteRepository},
        ledger::StatusLedger,
        user::UserRepository,
    },
};
use tracing::warn;

pub struct IssueCommandService {
    pub(super) write_repo: Arc<dyn IssueWriteRepository>,
    pub(super) read_repo: Arc<dyn IssueReadRepository>,
    pub(super) ledger: Arc<dyn StatusLedger>,
    pub(super) feedback_repo: Arc<dyn FeedbackRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) image_store: Arc<dyn ImageStore>,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) clock: Arc<dyn Clock>,
}

impl IssueCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        write_repo: Arc<dyn IssueWriteRepository>,
        read_repo: Arc<dyn IssueReadRepository>,
        ledger: Arc<dyn StatusLedger>,
        feedback_repo: Arc<dyn FeedbackRepository>,
        user_repo: Arc<dyn UserRepository>,
        image_store: Arc<dyn ImageStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            ledger,
            feedback_repo,
            user_repo,
            image_store,
            notifier,
            clock,
        }
    }

    /// Delivery problems never fail the command that triggered them.
    pub(super) async fn notify(&self, message: Option<OutgoingMessage>) {
        let Some(message) = message else {
            return;
        };
        let recipient = message.recipient.clone();
        if let Err(err) = self.notifier.deliver(message).await {
            warn!(%recipient, error = %err, "notification delivery failed");
        }
    }

    pub(super) async fn store_upload(
        &self,
        kind: ImageKind,
        upload: Option<UploadedImage>,
    ) -> ApplicationResult<Option<ImageRef>> {
        match upload {
            Some(upload) => Ok(Some(self.image_store.save(kind, upload).await?)),
            None => Ok(None),
        }
    }

    /// Drops an upload whose record failed to persist.
    pub(super) async fn discard_upload(&self, image: Option<&ImageRef>) {
        let Some(image) = image else {
            return;
        };
        if let Err(err) = self.image_store.discard(image).await {
            warn!(path = image.as_str(), error = %err, "orphaned upload left behind");
        }
    }
}
