pub mod entity;
pub mod repository;

pub use entity::{StatusEntry, StatusTransition};
pub use repository::StatusLedger;
