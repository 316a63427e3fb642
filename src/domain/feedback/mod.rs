pub mod entity;
pub mod repository;

pub use entity::{Feedback, NewFeedback, Rating};
pub use repository::FeedbackRepository;
