use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::value_objects::IssueId;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset position in the newest-first issue listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueListCursor {
    pub created_at: DateTime<Utc>,
    pub issue_id: IssueId,
}

impl IssueListCursor {
    pub fn from_parts(created_at: DateTime<Utc>, issue_id: IssueId) -> Self {
        Self {
            created_at,
            issue_id,
        }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.created_at.to_rfc3339(), self.issue_id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let invalid = || DomainError::Validation("invalid cursor token".into());
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (created_at, id) = raw.split_once('|').ok_or_else(invalid)?;
        let created_at = DateTime::parse_from_rfc3339(created_at)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let id = id.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::from_parts(created_at, IssueId::new(id)?))
    }
}
