pub mod auth;
pub mod feedback;
pub mod issues;
pub mod ledger;
pub mod pagination;
pub mod serde_time;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use feedback::FeedbackDto;
pub use issues::{CatalogDto, DashboardDto, IssueDto, ReportDocument};
pub use ledger::StatusEntryDto;
pub use pagination::CursorPage;
pub use users::{CapabilityView, UserDto, UserProfileDto};
