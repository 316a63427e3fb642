// src/application/ports/report.rs
use crate::{application::ApplicationResult, domain::issue::IssueDossier};

/// Synchronous and CPU bound; callers run it on the blocking pool.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, dossier: &IssueDossier) -> ApplicationResult<Vec<u8>>;
}
