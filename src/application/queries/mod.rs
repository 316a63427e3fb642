pub mod issues;
pub mod users;
