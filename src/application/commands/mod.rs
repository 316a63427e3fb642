pub mod issues;
pub mod users;

pub(crate) mod capability;
