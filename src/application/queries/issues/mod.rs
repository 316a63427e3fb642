// src/application/queries/issues/mod.rs
mod dashboard;
mod get;
mod history;
mod list;
mod report;
mod service;

pub use list::ListIssuesQuery;
pub use service::IssueQueryService;
