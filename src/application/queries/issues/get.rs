use super::IssueQueryService;
use crate::application::{
    commands::capability::ensure_capability,
    dto::{AuthenticatedUser, IssueDto},
    error::ApplicationResult,
};

impl IssueQueryService {
    pub async fn get_issue(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<IssueDto> {
        ensure_capability(actor, "issues", "read")?;
        Ok(self.load_issue(id).await?.into())
    }
}
