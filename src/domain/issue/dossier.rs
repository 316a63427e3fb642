use crate::domain::feedback::Feedback;
use crate::domain::issue::entity::Issue;
use crate::domain::ledger::StatusEntry;
use crate::domain::user::ContactProfile;

/// Everything recorded about one issue, gathered for report synthesis.
#[derive(Debug, Clone)]
pub struct IssueDossier {
    pub issue: Issue,
    /// Contact details of the reporting citizen, when the account still resolves.
    pub citizen: Option<ContactProfile>,
    /// Ledger entries, oldest first.
    pub history: Vec<StatusEntry>,
    pub latest_feedback: Option<Feedback>,
}
