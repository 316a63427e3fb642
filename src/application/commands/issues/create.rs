// src/application/commands/issues/create.rs
use super::{IssueCommandService, notifications::submission_message};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, IssueDto},
        error::ApplicationResult,
        ports::storage::{ImageKind, UploadedImage},
    },
    domain::{
        issue::{Area, IssueCategory, IssueDescription, Location, NewIssue, analyze},
        user::ContactProfile,
    },
};
use tracing::{info, warn};

pub struct ReportIssueCommand {
    pub issue_type: String,
    pub description: String,
    pub area: String,
    pub street: Option<String>,
    pub landmark: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub before_image: Option<UploadedImage>,
}

impl IssueCommandService {
    pub async fn report_issue(
        &self,
        actor: &AuthenticatedUser,
        command: ReportIssueCommand,
    ) -> ApplicationResult<IssueDto> {
        ensure_capability(actor, "issues", "create")?;

        let category: IssueCategory = command.issue_type.parse()?;
        let description = IssueDescription::new(command.description)?;
        let location = Location::new(Area::new(&command.area)?, command.street, command.landmark);
        let contact = ContactProfile::from_raw(command.name, command.email, command.phone)?;

        let before_image = self.store_upload(ImageKind::Before, command.before_image).await?;

        let analysis = analyze(category.label(), description.as_str());
        let new_issue = NewIssue {
            owner_id: actor.id,
            category,
            description,
            location,
            before_image: before_image.clone(),
            analysis,
            opening_remarks: NewIssue::CITIZEN_REPORT_REMARKS.to_string(),
            created_at: self.clock.now(),
        };

        let issue = match self.write_repo.insert(new_issue).await {
            Ok(issue) => issue,
            Err(err) => {
                self.discard_upload(before_image.as_ref()).await;
                return Err(err.into());
            }
        };
        info!(
            issue_id = %issue.id,
            owner_id = %issue.owner_id,
            issue_type = %issue.category,
            "issue reported"
        );

        // Best effort once the issue is recorded.
        if let Err(err) = self.remember_contact(actor, &contact).await {
            warn!(user_id = %actor.id, error = %err, "contact details not saved");
        }

        self.notify(submission_message(&issue, &contact)).await;
        Ok(issue.into())
    }

    async fn remember_contact(
        &self,
        actor: &AuthenticatedUser,
        supplied: &ContactProfile,
    ) -> ApplicationResult<()> {
        if supplied.is_empty() {
            return Ok(());
        }
        let current = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .map(|user| user.contact)
            .unwrap_or_default();
        let merged = current.merged_with(supplied);
        if merged != current {
            self.user_repo.update_contact(actor.id, &merged).await?;
        }
        Ok(())
    }
}
