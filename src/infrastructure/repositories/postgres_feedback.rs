// src/infrastructure/repositories/postgres_feedback.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::feedback::{Feedback, FeedbackRepository, NewFeedback, Rating};
use crate::domain::issue::IssueId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresFeedbackRepository {
    pool: PgPool,
}

impl PostgresFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FeedbackRow {
    id: i64,
    issue_id: i64,
    rating: i16,
    comments: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for Feedback {
    type Error = DomainError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        Ok(Feedback {
            id: row.id,
            issue_id: IssueId::new(row.issue_id)?,
            rating: Rating::new(i64::from(row.rating))?,
            comments: row.comments,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn insert(&self, feedback: NewFeedback) -> DomainResult<Feedback> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            "INSERT INTO feedback (issue_id, rating, comments, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, issue_id, rating, comments, created_at",
        )
        .bind(i64::from(feedback.issue_id))
        .bind(i16::from(feedback.rating.value()))
        .bind(feedback.comments)
        .bind(feedback.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Feedback::try_from(row)
    }

    async fn latest_for_issue(&self, issue_id: IssueId) -> DomainResult<Option<Feedback>> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            "SELECT id, issue_id, rating, comments, created_at
             FROM feedback
             WHERE issue_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )
        .bind(i64::from(issue_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Feedback::try_from).transpose()
    }
}
