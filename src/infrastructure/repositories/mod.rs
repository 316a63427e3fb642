// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_feedback;
mod postgres_issue;
mod postgres_ledger;
mod postgres_user;

pub use error::map_sqlx;
pub use postgres_feedback::PostgresFeedbackRepository;
pub use postgres_issue::{PostgresIssueReadRepository, PostgresIssueWriteRepository};
pub use postgres_ledger::PostgresStatusLedger;
pub use postgres_user::PostgresUserRepository;
