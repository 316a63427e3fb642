// src/infrastructure/report/mod.rs
//! PDF case reports. Composition and serialization are separate so the page
//! model can be inspected without parsing PDF bytes.
mod images;
pub mod layout;
mod metrics;
mod pdf;
mod wrap;

pub use images::FsImageSource;
pub use layout::{ImageSource, RasterImage, ReportLayout, compose};

use crate::application::{ApplicationResult, ports::report::ReportRenderer};
use crate::domain::issue::IssueDossier;
use std::sync::Arc;
use tracing::debug;

pub struct PdfReportRenderer {
    images: Arc<dyn ImageSource>,
}

impl PdfReportRenderer {
    pub fn new(images: Arc<dyn ImageSource>) -> Self {
        Self { images }
    }
}

impl Default for PdfReportRenderer {
    fn default() -> Self {
        Self::new(Arc::new(FsImageSource))
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, dossier: &IssueDossier) -> ApplicationResult<Vec<u8>> {
        let layout = compose(dossier, self.images.as_ref());
        let bytes = pdf::serialize(&layout)?;
        debug!(
            issue_id = %dossier.issue.id,
            pages = layout.pages.len(),
            bytes = bytes.len(),
            "report rendered"
        );
        Ok(bytes)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{StubImages, dossier, feedback, solid_image};
    use super::*;
    use crate::application::error::ApplicationError;
    use crate::domain::issue::ImageRef;

    fn renderer_with(images: StubImages) -> PdfReportRenderer {
        PdfReportRenderer::new(Arc::new(images))
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn renders_a_pdf_with_the_case_details() {
        let bytes = renderer_with(StubImages::default()).render(&dossier()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"(Issue ID: 41) Tj"));
        assert!(contains(&bytes, b"(Area: T. Nagar) Tj"));
        assert!(contains(&bytes, b"(Photographic Evidence) Tj"));
    }

    #[test]
    fn rendering_is_repeatable() {
        let mut d = dossier();
        d.latest_feedback = Some(feedback(5, Some("Quick work")));
        d.issue.before_image = Some(ImageRef::new("static/uploads/before_a.png").unwrap());
        let renderer = renderer_with(StubImages::with("static/uploads/before_a.png", solid_image(8, 6)));

        let first = renderer.render(&d).unwrap();
        let second = renderer.render(&d).unwrap();
        assert_eq!(first, second);
        assert!(contains(&first, b"/Subtype /Image"));
    }

    #[test]
    fn corrupt_pixels_surface_as_rendering_error() {
        let mut d = dossier();
        d.issue.before_image = Some(ImageRef::new("static/uploads/before_b.png").unwrap());
        let broken = RasterImage {
            width: 3,
            height: 3,
            rgb: vec![0; 4],
        };
        let err = renderer_with(StubImages::with("static/uploads/before_b.png", broken))
            .render(&d)
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Rendering(_)));
    }
}
