// src/infrastructure/repositories/postgres_issue.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::{
    Area, ImageRef, Issue, IssueDescription, IssueFilter, IssueId, IssueListCursor,
    IssueReadRepository, IssueStatus, IssueWriteRepository, Location, NewIssue,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ISSUE_COLUMNS: &str = "id, user_id, issue_type, description, area, street, landmark, \
     before_image, after_image, ai_summary, current_status, authority_remarks, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresIssueWriteRepository {
    pool: PgPool,
}

impl PostgresIssueWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresIssueReadRepository {
    pool: PgPool,
}

impl PostgresIssueReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct IssueRow {
    id: i64,
    user_id: i64,
    issue_type: String,
    description: String,
    area: String,
    street: Option<String>,
    landmark: Option<String>,
    before_image: Option<String>,
    after_image: Option<String>,
    ai_summary: Option<String>,
    current_status: String,
    authority_remarks: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IssueRow> for Issue {
    type Error = DomainError;

    fn try_from(row: IssueRow) -> Result<Self, Self::Error> {
        Ok(Issue {
            id: IssueId::new(row.id)?,
            owner_id: UserId::new(row.user_id)?,
            category: row.issue_type.parse()?,
            description: IssueDescription::new(row.description)?,
            location: Location::new(Area::new(&row.area)?, row.street, row.landmark),
            before_image: row.before_image.map(ImageRef::new).transpose()?,
            after_image: row.after_image.map(ImageRef::new).transpose()?,
            analysis: row.ai_summary,
            current_status: IssueStatus::new(row.current_status)?,
            authority_remarks: row.authority_remarks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl IssueWriteRepository for PostgresIssueWriteRepository {
    async fn insert(&self, issue: NewIssue) -> DomainResult<Issue> {
        let status = issue.initial_status();
        let NewIssue {
            owner_id,
            category,
            description,
            location,
            before_image,
            analysis,
            opening_remarks,
            created_at,
        } = issue;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let sql = format!(
            "INSERT INTO issues (user_id, issue_type, description, area, street, landmark,
                                 before_image, ai_summary, current_status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
             RETURNING {ISSUE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, IssueRow>(&sql)
            .bind(i64::from(owner_id))
            .bind(category.label())
            .bind(description.as_str())
            .bind(location.area.as_str())
            .bind(location.street)
            .bind(location.landmark)
            .bind(before_image.map(|image| image.to_string()))
            .bind(analysis)
            .bind(status.as_str())
            .bind(created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO issue_status_log (issue_id, status, remarks, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(row.id)
        .bind(status.as_str())
        .bind(opening_remarks)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        Issue::try_from(row)
    }
}

impl PostgresIssueReadRepository {
    fn apply_conditions<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        filter: &'a IssueFilter,
        cursor: Option<&'a IssueListCursor>,
    ) {
        let mut has_where = false;
        let mut next_clause = |builder: &mut QueryBuilder<'a, Postgres>| {
            builder.push(if has_where { " AND " } else { " WHERE " });
            has_where = true;
        };

        if let Some(status) = &filter.status {
            next_clause(builder);
            builder.push("current_status = ");
            builder.push_bind(status.as_str());
        }

        if let Some(owner_id) = filter.owner_id {
            next_clause(builder);
            builder.push("user_id = ");
            builder.push_bind(i64::from(owner_id));
        }

        if let Some(cursor) = cursor {
            next_clause(builder);
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(i64::from(cursor.issue_id));
            builder.push(")");
        }
    }
}

#[async_trait]
impl IssueReadRepository for PostgresIssueReadRepository {
    async fn find_by_id(&self, id: IssueId) -> DomainResult<Option<Issue>> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = $1");
        let row = sqlx::query_as::<_, IssueRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Issue::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: &IssueFilter,
        limit: u32,
        cursor: Option<IssueListCursor>,
    ) -> DomainResult<(Vec<Issue>, Option<IssueListCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = i64::from(limit) + 1;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ISSUE_COLUMNS} FROM issues"));
        Self::apply_conditions(&mut builder, filter, cursor.as_ref());
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<IssueRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut issues = rows
            .into_iter()
            .map(Issue::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut next_cursor = None;
        if issues.len() > limit as usize {
            issues.pop();
            if let Some(last) = issues.last() {
                next_cursor = Some(IssueListCursor::from_parts(last.created_at, last.id));
            }
        }

        Ok((issues, next_cursor))
    }

    async fn count(&self, status: Option<&IssueStatus>) -> DomainResult<u64> {
        let count = match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(1) FROM issues WHERE current_status = $1",
                )
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM issues")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(map_sqlx)?;

        Ok(count.unsigned_abs())
    }
}
