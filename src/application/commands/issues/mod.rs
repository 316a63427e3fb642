// src/application/commands/issues/mod.rs
mod create;
mod feedback;
mod notifications;
mod service;
mod update_status;

pub use create::ReportIssueCommand;
pub use feedback::SubmitFeedbackCommand;
pub use notifications::{status_update_message, submission_message};
pub use service::IssueCommandService;
pub use update_status::UpdateIssueStatusCommand;
