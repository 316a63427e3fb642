use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IssueId(pub i64);

impl IssueId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("issue id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<IssueId> for i64 {
    fn from(value: IssueId) -> Self {
        value.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDescription(String);

impl IssueDescription {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "issue description is required".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for IssueDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Administrator supplied status label. Free-form, but bounded by the column width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueStatus(String);

impl IssueStatus {
    pub const PENDING: &'static str = "Pending";
    pub const RESOLVED: &'static str = "Resolved";
    const MAX_LEN: usize = 50;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("status cannot be empty".into()));
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "status must be at most {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn pending() -> Self {
        Self(Self::PENDING.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<IssueStatus> for String {
    fn from(value: IssueStatus) -> Self {
        value.0
    }
}

/// Path of a stored evidence photo, as returned by the image store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("image path cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_trimmed_and_bounded() {
        assert_eq!(IssueStatus::new(" In Progress ").unwrap().as_str(), "In Progress");
        assert!(IssueStatus::new("   ").is_err());
        assert!(IssueStatus::new("x".repeat(51)).is_err());
    }

    #[test]
    fn blank_description_is_rejected() {
        assert!(IssueDescription::new(" \n ").is_err());
    }
}
