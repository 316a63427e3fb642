// tests/support/mocks/renderer.rs
use civiccare::application::{
    ApplicationResult, error::ApplicationError, ports::report::ReportRenderer,
};
use civiccare::domain::issue::IssueDossier;

#[derive(Debug, Default)]
pub struct FailingRenderer;

impl ReportRenderer for FailingRenderer {
    fn render(&self, _dossier: &IssueDossier) -> ApplicationResult<Vec<u8>> {
        Err(ApplicationError::rendering("font table corrupted"))
    }
}
