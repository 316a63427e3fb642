// src/application/queries/issues/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::report::ReportRenderer,
    },
    domain::{
        feedback::FeedbackRepository,
        issue::{Issue, IssueId, IssueReadRepository},
        ledger::StatusLedger,
        user::UserRepository,
    },
};

pub struct IssueQueryService {
    pub(super) read_repo: Arc<dyn IssueReadRepository>,
    pub(super) ledger: Arc<dyn StatusLedger>,
    pub(super) feedback_repo: Arc<dyn FeedbackRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) renderer: Arc<dyn ReportRenderer>,
}

impl IssueQueryService {
    pub fn new(
        read_repo: Arc<dyn IssueReadRepository>,
        ledger: Arc<dyn StatusLedger>,
        feedback_repo: Arc<dyn FeedbackRepository>,
        user_repo: Arc<dyn UserRepository>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            read_repo,
            ledger,
            feedback_repo,
            user_repo,
            renderer,
        }
    }

    pub(super) async fn load_issue(&self, id: i64) -> ApplicationResult<Issue> {
        let id = IssueId::new(id)?;
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("issue not found"))
    }
}
