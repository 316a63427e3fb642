use super::IssueQueryService;
use crate::application::{
    commands::capability::ensure_capability,
    dto::{AuthenticatedUser, StatusEntryDto},
    error::ApplicationResult,
};

impl IssueQueryService {
    /// Ledger entries for the issue, oldest first.
    pub async fn issue_history(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<Vec<StatusEntryDto>> {
        ensure_capability(actor, "issues", "read")?;
        let issue = self.load_issue(id).await?;
        let entries = self.ledger.history(issue.id).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}
