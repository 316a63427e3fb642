use crate::domain::errors::DomainResult;
use crate::domain::issue::{
    cursor::IssueListCursor,
    entity::{Issue, NewIssue},
    value_objects::{IssueId, IssueStatus},
};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    pub owner_id: Option<UserId>,
}

#[async_trait]
pub trait IssueWriteRepository: Send + Sync {
    /// Insert the issue together with its opening ledger entry in one unit.
    async fn insert(&self, issue: NewIssue) -> DomainResult<Issue>;
}

#[async_trait]
pub trait IssueReadRepository: Send + Sync {
    async fn find_by_id(&self, id: IssueId) -> DomainResult<Option<Issue>>;

    /// Newest first, at most `limit` rows after `cursor`.
    async fn list_page(
        &self,
        filter: &IssueFilter,
        limit: u32,
        cursor: Option<IssueListCursor>,
    ) -> DomainResult<(Vec<Issue>, Option<IssueListCursor>)>;

    async fn count(&self, status: Option<&IssueStatus>) -> DomainResult<u64>;
}
