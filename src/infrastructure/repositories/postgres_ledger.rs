// src/infrastructure/repositories/postgres_ledger.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::{IssueId, IssueStatus};
use crate::domain::ledger::{StatusEntry, StatusLedger, StatusTransition};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresStatusLedger {
    pool: PgPool,
}

impl PostgresStatusLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StatusEntryRow {
    id: i64,
    issue_id: i64,
    status: String,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ProjectionRow {
    current_status: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StatusEntryRow> for StatusEntry {
    type Error = DomainError;

    fn try_from(row: StatusEntryRow) -> Result<Self, Self::Error> {
        Ok(StatusEntry {
            id: row.id,
            issue_id: IssueId::new(row.issue_id)?,
            status: IssueStatus::new(row.status)?,
            remarks: row.remarks,
            recorded_at: row.created_at,
        })
    }
}

#[async_trait]
impl StatusLedger for PostgresStatusLedger {
    async fn append(&self, transition: StatusTransition) -> DomainResult<StatusEntry> {
        let StatusTransition {
            issue_id,
            status,
            remarks,
            authority_remarks,
            after_image,
            recorded_at,
        } = transition;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // The row lock serializes appends per issue. Column references in SET
        // read the locked row version, so a blank status repeats the status
        // committed by the previous append and `updated_at` (the newest entry
        // time) only moves forward.
        let projection = sqlx::query_as::<_, ProjectionRow>(
            "UPDATE issues
             SET current_status = COALESCE($2, current_status),
                 authority_remarks = COALESCE($3, authority_remarks),
                 after_image = COALESCE($4, after_image),
                 updated_at = GREATEST($5, updated_at)
             WHERE id = $1
             RETURNING current_status, updated_at",
        )
        .bind(i64::from(issue_id))
        .bind(status.as_ref().map(IssueStatus::as_str))
        .bind(authority_remarks)
        .bind(after_image.map(|image| image.to_string()))
        .bind(recorded_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::not_found("issue not found"))?;

        let row = sqlx::query_as::<_, StatusEntryRow>(
            "INSERT INTO issue_status_log (issue_id, status, remarks, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, issue_id, status, remarks, created_at",
        )
        .bind(i64::from(issue_id))
        .bind(&projection.current_status)
        .bind(remarks)
        .bind(projection.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        StatusEntry::try_from(row)
    }

    async fn history(&self, issue_id: IssueId) -> DomainResult<Vec<StatusEntry>> {
        let rows = sqlx::query_as::<_, StatusEntryRow>(
            "SELECT id, issue_id, status, remarks, created_at
             FROM issue_status_log
             WHERE issue_id = $1
             ORDER BY id ASC",
        )
        .bind(i64::from(issue_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(StatusEntry::try_from).collect()
    }
}
