// src/domain/issue/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::catalog::{Area, IssueCategory};
use crate::domain::issue::value_objects::{ImageRef, IssueDescription, IssueId, IssueStatus};
use crate::domain::ledger::{StatusEntry, StatusTransition};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub area: Area,
    pub street: Option<String>,
    pub landmark: Option<String>,
}

impl Location {
    pub fn new(area: Area, street: Option<String>, landmark: Option<String>) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            area,
            street: clean(street),
            landmark: clean(landmark),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Issue {
    pub id: IssueId,
    pub owner_id: UserId,
    pub category: IssueCategory,
    pub description: IssueDescription,
    pub location: Location,
    pub before_image: Option<ImageRef>,
    pub after_image: Option<ImageRef>,
    pub analysis: Option<String>,
    /// Projection of the newest ledger entry; only changed through `apply_transition`.
    pub current_status: IssueStatus,
    pub authority_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Folds an appended ledger entry, and the side fields of the transition
    /// that produced it, into the projection.
    pub fn apply_transition(
        &mut self,
        transition: &StatusTransition,
        entry: &StatusEntry,
    ) -> DomainResult<()> {
        if transition.issue_id != self.id || entry.issue_id != self.id {
            return Err(DomainError::Validation(format!(
                "transition for issue {} applied to issue {}",
                transition.issue_id, self.id
            )));
        }

        self.current_status = entry.status.clone();
        if let Some(remarks) = &transition.authority_remarks {
            self.authority_remarks = Some(remarks.clone());
        }
        if let Some(image) = &transition.after_image {
            self.after_image = Some(image.clone());
        }
        self.updated_at = entry.recorded_at;
        Ok(())
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewIssue {
    pub owner_id: UserId,
    pub category: IssueCategory,
    pub description: IssueDescription,
    pub location: Location,
    pub before_image: Option<ImageRef>,
    pub analysis: String,
    /// Remarks for the opening ledger entry.
    pub opening_remarks: String,
    pub created_at: DateTime<Utc>,
}

impl NewIssue {
    pub const CITIZEN_REPORT_REMARKS: &'static str = "Issue reported by citizen.";

    pub fn initial_status(&self) -> IssueStatus {
        IssueStatus::pending()
    }
}
