use crate::domain::feedback::Feedback;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackDto {
    pub id: i64,
    pub issue_id: i64,
    pub rating: u8,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackDto {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            issue_id: feedback.issue_id.into(),
            rating: feedback.rating.value(),
            comments: feedback.comments,
            created_at: feedback.created_at,
        }
    }
}
