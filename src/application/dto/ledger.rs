use crate::domain::ledger::StatusEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusEntryDto {
    pub id: i64,
    pub issue_id: i64,
    pub status: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<StatusEntry> for StatusEntryDto {
    fn from(entry: StatusEntry) -> Self {
        Self {
            id: entry.id,
            issue_id: entry.issue_id.into(),
            status: entry.status.into(),
            remarks: entry.remarks,
            created_at: entry.recorded_at,
        }
    }
}
