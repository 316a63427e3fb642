use crate::domain::issue::{AREAS, Issue, IssueCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueDto {
    pub id: i64,
    pub owner_id: i64,
    pub issue_type: String,
    pub description: String,
    pub area: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub before_image: Option<String>,
    #[serde(default)]
    pub after_image: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
    pub current_status: String,
    #[serde(default)]
    pub authority_remarks: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Issue> for IssueDto {
    fn from(issue: Issue) -> Self {
        Self {
            id: issue.id.into(),
            owner_id: issue.owner_id.into(),
            issue_type: issue.category.label().to_string(),
            description: issue.description.into_inner(),
            area: issue.location.area.to_string(),
            street: issue.location.street,
            landmark: issue.location.landmark,
            before_image: issue.before_image.map(|image| image.to_string()),
            after_image: issue.after_image.map(|image| image.to_string()),
            analysis: issue.analysis,
            current_status: issue.current_status.into(),
            authority_remarks: issue.authority_remarks,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        }
    }
}

/// Options offered by the reporting form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogDto {
    pub issue_types: Vec<String>,
    pub areas: Vec<String>,
}

impl CatalogDto {
    pub fn current() -> Self {
        Self {
            issue_types: IssueCategory::ALL
                .iter()
                .map(|category| category.label().to_string())
                .collect(),
            areas: AREAS.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub total: u64,
    pub pending: u64,
    pub resolved: u64,
}

/// Rendered report ready to be streamed as an attachment.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ReportDocument {
    pub const CONTENT_TYPE: &'static str = "application/pdf";
}
