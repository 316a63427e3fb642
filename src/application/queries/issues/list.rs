use super::IssueQueryService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, CursorPage, IssueDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        issue::{IssueFilter, IssueListCursor, IssueStatus},
    },
};

pub struct ListIssuesQuery {
    pub status: Option<String>,
    /// Restrict the listing to the caller's own reports.
    pub mine: bool,
    pub limit: u32,
    pub cursor: Option<String>,
}

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

impl IssueQueryService {
    pub async fn list_issues(
        &self,
        actor: &AuthenticatedUser,
        query: ListIssuesQuery,
    ) -> ApplicationResult<CursorPage<IssueDto>> {
        ensure_capability(actor, "issues", "read")?;

        let filter = IssueFilter {
            status: query
                .status
                .filter(|status| !status.trim().is_empty())
                .map(IssueStatus::new)
                .transpose()?,
            owner_id: query.mine.then_some(actor.id),
        };
        let limit = normalize_limit(query.limit);
        let cursor = decode_cursor(query.cursor.as_deref())?;

        let (issues, next_cursor) = self.read_repo.list_page(&filter, limit, cursor).await?;

        let items = issues.into_iter().map(Into::into).collect();
        Ok(CursorPage::new(
            items,
            next_cursor.map(|cursor| cursor.encode()),
        ))
    }
}

fn normalize_limit(limit: u32) -> u32 {
    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}

fn decode_cursor(token: Option<&str>) -> ApplicationResult<Option<IssueListCursor>> {
    match token {
        Some(value) => match IssueListCursor::decode(value) {
            Ok(cursor) => Ok(Some(cursor)),
            Err(DomainError::Validation(msg)) => Err(ApplicationError::validation(msg)),
            Err(other) => Err(ApplicationError::from(other)),
        },
        None => Ok(None),
    }
}
