// src/application/queries/issues/report.rs
use super::IssueQueryService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, ReportDocument},
        error::{ApplicationError, ApplicationResult},
    },
    domain::issue::IssueDossier,
};
use std::sync::Arc;
use tracing::{error, info};

impl IssueQueryService {
    /// Gather the issue's record and render it as a PDF document.
    pub async fn issue_report(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<ReportDocument> {
        ensure_capability(actor, "reports", "read")?;

        let dossier = self.assemble_dossier(id).await?;
        let issue_id = dossier.issue.id;

        let renderer = Arc::clone(&self.renderer);
        let bytes = tokio::task::spawn_blocking(move || renderer.render(&dossier))
            .await
            .map_err(|err| ApplicationError::rendering(err.to_string()))?
            .inspect_err(|err| error!(%issue_id, error = %err, "report rendering failed"))?;

        info!(%issue_id, size = bytes.len(), "issue report rendered");
        Ok(ReportDocument {
            file_name: format!("issue_{issue_id}_report.pdf"),
            bytes,
        })
    }

    pub(super) async fn assemble_dossier(&self, id: i64) -> ApplicationResult<IssueDossier> {
        let issue = self.load_issue(id).await?;
        let citizen = self
            .user_repo
            .find_by_id(issue.owner_id)
            .await?
            .map(|user| user.contact);
        let history = self.ledger.history(issue.id).await?;
        let latest_feedback = self.feedback_repo.latest_for_issue(issue.id).await?;

        Ok(IssueDossier {
            issue,
            citizen,
            history,
            latest_feedback,
        })
    }
}
