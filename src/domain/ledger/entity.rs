// src/domain/ledger/entity.rs
use crate::domain::issue::{ImageRef, IssueId, IssueStatus};
use chrono::{DateTime, Utc};

/// One immutable row of an issue's status history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub id: i64,
    pub issue_id: IssueId,
    pub status: IssueStatus,
    pub remarks: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl StatusEntry {
    /// Timeline line used by reports: `DD-MM-YYYY HH:MM - <status>: <remarks>`.
    pub fn timeline_line(&self) -> String {
        format!(
            "{} - {}: {}",
            self.recorded_at.format("%d-%m-%Y %H:%M"),
            self.status,
            self.remarks.as_deref().unwrap_or_default()
        )
    }
}

/// A status change to append to the ledger. The side fields are written to the
/// issue in the same unit as the ledger row. A `None` status repeats whatever
/// the issue holds when the append is serialized.
#[derive(Debug, Clone)]
pub struct StatusTransition {
    pub issue_id: IssueId,
    pub status: Option<IssueStatus>,
    pub remarks: Option<String>,
    pub authority_remarks: Option<String>,
    pub after_image: Option<ImageRef>,
    pub recorded_at: DateTime<Utc>,
}

impl StatusTransition {
    pub fn new(
        issue_id: IssueId,
        status: Option<IssueStatus>,
        remarks: Option<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            issue_id,
            status,
            remarks,
            authority_remarks: None,
            after_image: None,
            recorded_at,
        }
    }

    pub fn with_authority_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.authority_remarks = Some(remarks.into());
        self
    }

    pub fn with_after_image(mut self, image: ImageRef) -> Self {
        self.after_image = Some(image);
        self
    }

    /// Status and timestamp the ledger records, resolved against the issue as
    /// it stands once the append holds its lock. The timestamp never falls
    /// behind `newest_entry_at`.
    pub fn settle(
        &self,
        current: &IssueStatus,
        newest_entry_at: DateTime<Utc>,
    ) -> (IssueStatus, DateTime<Utc>) {
        let status = self.status.clone().unwrap_or_else(|| current.clone());
        (status, self.recorded_at.max(newest_entry_at))
    }
}
