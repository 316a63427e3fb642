// src/application/commands/issues/update_status.rs
use super::{IssueCommandService, notifications::status_update_message};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, IssueDto},
        error::{ApplicationError, ApplicationResult},
        ports::storage::{ImageKind, UploadedImage},
    },
    domain::{
        issue::{IssueId, IssueStatus},
        ledger::StatusTransition,
    },
};
use tracing::info;

pub struct UpdateIssueStatusCommand {
    pub issue_id: i64,
    /// Blank or absent keeps the current status.
    pub status: Option<String>,
    pub remarks: Option<String>,
    pub after_image: Option<UploadedImage>,
}

impl IssueCommandService {
    pub async fn update_status(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateIssueStatusCommand,
    ) -> ApplicationResult<IssueDto> {
        ensure_capability(actor, "issues", "update_status")?;

        let id = IssueId::new(command.issue_id)?;
        let mut issue = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("issue not found"))?;

        let requested = command
            .status
            .filter(|status| !status.trim().is_empty())
            .map(IssueStatus::new)
            .transpose()?;
        let remarks = command
            .remarks
            .map(|remarks| remarks.trim().to_string())
            .filter(|remarks| !remarks.is_empty());

        let after_image = self.store_upload(ImageKind::After, command.after_image).await?;

        let mut transition = StatusTransition::new(id, requested, remarks.clone(), self.clock.now());
        if let Some(remarks) = &remarks {
            transition = transition.with_authority_remarks(remarks.clone());
        }
        if let Some(image) = after_image {
            transition = transition.with_after_image(image);
        }

        let entry = match self.ledger.append(transition.clone()).await {
            Ok(entry) => entry,
            Err(err) => {
                self.discard_upload(transition.after_image.as_ref()).await;
                return Err(err.into());
            }
        };
        issue.apply_transition(&transition, &entry)?;
        info!(
            issue_id = %issue.id,
            entry_id = entry.id,
            status = %entry.status,
            actor_id = %actor.id,
            "issue status updated"
        );

        if let Some(owner) = self.user_repo.find_by_id(issue.owner_id).await? {
            self.notify(status_update_message(&issue, &owner.contact, remarks.as_deref()))
                .await;
        }

        Ok(issue.into())
    }
}
