use crate::domain::errors::DomainResult;
use crate::domain::issue::IssueId;
use crate::domain::ledger::entity::{StatusEntry, StatusTransition};
use async_trait::async_trait;

/// Append-only status history. `append` also moves the issue's denormalized
/// `current_status` (and the transition's side fields) atomically.
#[async_trait]
pub trait StatusLedger: Send + Sync {
    /// Fails with `NotFound` when the issue does not exist.
    async fn append(&self, transition: StatusTransition) -> DomainResult<StatusEntry>;

    /// Entries for the issue in append order, oldest first.
    async fn history(&self, issue_id: IssueId) -> DomainResult<Vec<StatusEntry>>;
}
