// src/domain/issue/mod.rs
pub mod analysis;
pub mod catalog;
pub mod cursor;
pub mod dossier;
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use analysis::analyze;
pub use catalog::{AREAS, Area, IssueCategory};
pub use cursor::IssueListCursor;
pub use dossier::IssueDossier;
pub use entity::{Issue, Location, NewIssue};
pub use repository::{IssueFilter, IssueReadRepository, IssueWriteRepository};
pub use value_objects::{ImageRef, IssueDescription, IssueId, IssueStatus};
