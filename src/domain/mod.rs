pub mod errors;
pub mod feedback;
pub mod issue;
pub mod ledger;
pub mod user;
