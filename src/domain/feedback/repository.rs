use crate::domain::errors::DomainResult;
use crate::domain::feedback::entity::{Feedback, NewFeedback};
use crate::domain::issue::IssueId;
use async_trait::async_trait;

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn insert(&self, feedback: NewFeedback) -> DomainResult<Feedback>;

    async fn latest_for_issue(&self, issue_id: IssueId) -> DomainResult<Option<Feedback>>;
}
