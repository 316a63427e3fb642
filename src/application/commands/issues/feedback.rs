// src/application/commands/issues/feedback.rs
use super::IssueCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, FeedbackDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        feedback::{NewFeedback, Rating},
        issue::IssueId,
    },
};
use tracing::info;

pub struct SubmitFeedbackCommand {
    pub issue_id: i64,
    pub rating: i64,
    pub comments: Option<String>,
}

impl IssueCommandService {
    pub async fn submit_feedback(
        &self,
        actor: &AuthenticatedUser,
        command: SubmitFeedbackCommand,
    ) -> ApplicationResult<FeedbackDto> {
        ensure_capability(actor, "issues", "feedback")?;

        let issue_id = IssueId::new(command.issue_id)?;
        let rating = Rating::new(command.rating)?;
        if self.read_repo.find_by_id(issue_id).await?.is_none() {
            return Err(ApplicationError::not_found("issue not found"));
        }

        let feedback = self
            .feedback_repo
            .insert(NewFeedback {
                issue_id,
                rating,
                comments: command
                    .comments
                    .map(|comments| comments.trim().to_string())
                    .filter(|comments| !comments.is_empty()),
                created_at: self.clock.now(),
            })
            .await?;
        info!(issue_id = %issue_id, rating = %feedback.rating, "feedback submitted");

        Ok(feedback.into())
    }
}
