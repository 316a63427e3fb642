// src/domain/feedback/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::IssueId;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> DomainResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "rating must be between {} and {}",
                    Self::MIN,
                    Self::MAX
                ))
            })
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[derive(Debug, Clone)]
pub struct Feedback {
    pub id: i64,
    pub issue_id: IssueId,
    pub rating: Rating,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub issue_id: IssueId,
    pub rating: Rating,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}
