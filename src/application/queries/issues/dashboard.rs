use super::IssueQueryService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, DashboardDto},
        error::ApplicationResult,
    },
    domain::issue::IssueStatus,
};

impl IssueQueryService {
    pub async fn dashboard(&self, actor: &AuthenticatedUser) -> ApplicationResult<DashboardDto> {
        ensure_capability(actor, "dashboard", "read")?;

        let total = self.read_repo.count(None).await?;
        let pending = self
            .read_repo
            .count(Some(&IssueStatus::new(IssueStatus::PENDING)?))
            .await?;
        let resolved = self
            .read_repo
            .count(Some(&IssueStatus::new(IssueStatus::RESOLVED)?))
            .await?;

        Ok(DashboardDto {
            total,
            pending,
            resolved,
        })
    }
}
