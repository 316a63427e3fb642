// src/infrastructure/report/layout.rs
//! Positions every piece of report content on A4 pages. Coordinates are PDF
//! points with the origin at the bottom-left corner; text `y` is the baseline.
use super::{metrics::Font, wrap::wrap_text};
use crate::domain::issue::{ImageRef, IssueDossier};

pub const MM: f64 = 72.0 / 25.4;
pub const PAGE_WIDTH: f64 = 210.0 * MM;
pub const PAGE_HEIGHT: f64 = 297.0 * MM;
pub const MARGIN: f64 = 20.0 * MM;
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

const BODY_SIZE: f64 = 10.0;
const BODY_LEADING: f64 = 12.0;
const SECTION_GAP: f64 = 10.0;
const IMAGE_SLOT_HEIGHT: f64 = 80.0 * MM;
const FOOTER_Y: f64 = 15.0 * MM;

pub const TITLE: &str = "GOVERNMENT OF TAMIL NADU - CIVIC ISSUE REPORT";
pub const SUBTITLE: &str = "Chennai Metropolitan Area - AI-Assisted CivicCare System";
pub const EVIDENCE_HEADING: &str = "Photographic Evidence";
pub const FOOTER: &str =
    "Digitally generated document by Chennai CivicCare AI System - No manual signature required.";
const NOT_PROVIDED: &str = "Not Provided";

/// Decoded 8-bit RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// Resolves stored evidence paths to pixels. `None` means the picture is left out.
pub trait ImageSource: Send + Sync {
    fn load(&self, image: &ImageRef) -> Option<RasterImage>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub font: Font,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub image: RasterImage,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub texts: Vec<TextRun>,
    pub images: Vec<PlacedImage>,
}

impl Page {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(|run| run.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<Page>,
}

impl ReportLayout {
    /// All text in drawing order, across pages.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::lines)
    }
}

struct Composer {
    finished: Vec<Page>,
    current: Page,
    y: f64,
}

impl Composer {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Page::default(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn break_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn draw_at(&mut self, font: Font, size: f64, x: f64, y: f64, text: impl Into<String>) {
        self.current.texts.push(TextRun {
            font,
            size,
            x,
            y,
            text: text.into(),
        });
    }

    /// Draw at the margin on the current baseline, then move down by `advance`.
    fn line(&mut self, font: Font, size: f64, text: impl Into<String>, advance: f64) {
        if self.y < MARGIN {
            self.break_page();
        }
        self.draw_at(font, size, MARGIN, self.y, text);
        self.y -= advance;
    }

    fn field(&mut self, text: impl Into<String>, advance: f64) {
        self.line(Font::Helvetica, BODY_SIZE, text, advance);
    }

    fn heading(&mut self, title: &str) {
        self.line(Font::HelveticaBold, 12.0, title, 15.0);
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap_text(text, Font::Helvetica, BODY_SIZE, CONTENT_WIDTH) {
            self.field(line, BODY_LEADING);
        }
    }

    fn gap(&mut self, amount: f64) {
        self.y -= amount;
    }

    fn finish(mut self) -> ReportLayout {
        self.finished.push(self.current);
        ReportLayout {
            pages: self.finished,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn compose(dossier: &IssueDossier, images: &dyn ImageSource) -> ReportLayout {
    let mut page = Composer::new();
    summary_pages(&mut page, dossier);
    page.break_page();
    evidence_page(&mut page, dossier, images);
    page.finish()
}

fn summary_pages(page: &mut Composer, dossier: &IssueDossier) {
    let issue = &dossier.issue;

    page.line(Font::HelveticaBold, 16.0, TITLE, 20.0);
    page.field(SUBTITLE, 20.0);

    page.line(Font::HelveticaBold, 12.0, format!("Issue ID: {}", issue.id), 15.0);
    page.field(format!("Issue Type: {}", issue.category), 15.0);

    let citizen = dossier.citizen.as_ref();
    let name = citizen.and_then(|c| c.name.clone());
    let email = citizen.and_then(|c| c.email.as_ref().map(ToString::to_string));
    let phone = citizen.and_then(|c| c.phone.as_ref().map(ToString::to_string));
    page.field(
        format!("Citizen Name: {}", name.as_deref().unwrap_or(NOT_PROVIDED)),
        15.0,
    );
    page.field(
        format!("Citizen Email: {}", email.as_deref().unwrap_or(NOT_PROVIDED)),
        15.0,
    );
    page.field(
        format!("Citizen Phone: {}", phone.as_deref().unwrap_or(NOT_PROVIDED)),
        20.0,
    );

    let location = &issue.location;
    page.heading("Location Details");
    page.field(format!("Area: {}", location.area), 15.0);
    page.field(
        format!("Street: {}", location.street.as_deref().unwrap_or("-")),
        15.0,
    );
    page.field(
        format!("Landmark: {}", location.landmark.as_deref().unwrap_or("-")),
        20.0,
    );

    page.heading("Issue Description");
    page.paragraph(issue.description.as_str());
    page.gap(SECTION_GAP);

    if let Some(analysis) = non_blank(issue.analysis.as_deref()) {
        page.heading("AI Analysis Summary");
        page.paragraph(analysis);
        page.gap(SECTION_GAP);
    }

    if !dossier.history.is_empty() {
        page.heading("Status Timeline");
        for entry in &dossier.history {
            page.paragraph(&entry.timeline_line());
        }
        page.gap(SECTION_GAP);
    }

    if let Some(remarks) = non_blank(issue.authority_remarks.as_deref()) {
        page.heading("Authority Remarks");
        page.paragraph(remarks);
        page.gap(SECTION_GAP);
    }

    if let Some(feedback) = &dossier.latest_feedback {
        page.heading("Citizen Feedback");
        page.field(format!("Rating: {}", feedback.rating), 15.0);
        if let Some(comments) = non_blank(feedback.comments.as_deref()) {
            page.paragraph(comments);
        }
        page.gap(SECTION_GAP);
    }
}

fn evidence_page(page: &mut Composer, dossier: &IssueDossier, images: &dyn ImageSource) {
    let half = PAGE_WIDTH / 2.0;

    page.line(Font::HelveticaBold, 14.0, EVIDENCE_HEADING, 30.0);
    let label_y = page.y;
    page.draw_at(Font::HelveticaBold, 12.0, MARGIN, label_y, "Before Fix");
    page.draw_at(Font::HelveticaBold, 12.0, half, label_y, "After Fix");
    page.gap(20.0);

    let slot_width = half - 1.5 * MARGIN;
    let slot_bottom = page.y - IMAGE_SLOT_HEIGHT;
    let slots = [
        (MARGIN, dossier.issue.before_image.as_ref()),
        (half, dossier.issue.after_image.as_ref()),
    ];
    for (x, image_ref) in slots {
        let Some(image) = image_ref.and_then(|path| images.load(path)) else {
            continue;
        };
        if let Some(placed) = fit_into_slot(image, x, slot_bottom, slot_width, IMAGE_SLOT_HEIGHT) {
            page.current.images.push(placed);
        }
    }

    page.draw_at(Font::Helvetica, 8.0, MARGIN, FOOTER_Y, FOOTER);
}

/// Scale to fit inside the slot keeping the aspect ratio, centred on both axes.
fn fit_into_slot(
    image: RasterImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Option<PlacedImage> {
    if image.width == 0 || image.height == 0 {
        return None;
    }
    let (w, h) = (f64::from(image.width), f64::from(image.height));
    let scale = (width / w).min(height / h);
    let (drawn_w, drawn_h) = (w * scale, h * scale);
    Some(PlacedImage {
        x: x + (width - drawn_w) / 2.0,
        y: y + (height - drawn_h) / 2.0,
        width: drawn_w,
        height: drawn_h,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::report::fixtures::{
        StubImages, dossier, feedback, history_entry, solid_image,
    };

    fn page_lines(layout: &ReportLayout, index: usize) -> Vec<&str> {
        layout.pages[index].lines().collect()
    }

    #[test]
    fn first_page_follows_the_fixed_order() {
        let layout = compose(&dossier(), &StubImages::default());
        let lines = page_lines(&layout, 0);

        assert_eq!(lines[0], TITLE);
        assert_eq!(lines[1], SUBTITLE);
        assert_eq!(lines[2], "Issue ID: 41");
        assert_eq!(lines[3], "Issue Type: Potholes / Road Damage");
        assert_eq!(lines[4], "Citizen Name: Kavya");
        assert_eq!(lines[5], "Citizen Email: kavya@example.in");
        assert_eq!(lines[6], "Citizen Phone: Not Provided");
        assert_eq!(lines[7], "Location Details");
        assert_eq!(lines[8], "Area: T. Nagar");
        assert_eq!(lines[9], "Street: Anna Salai");
        assert_eq!(lines[10], "Landmark: -");
        assert_eq!(lines[11], "Issue Description");

        let order: Vec<usize> = [
            "AI Analysis Summary",
            "Status Timeline",
            "Authority Remarks",
        ]
        .iter()
        .map(|heading| lines.iter().position(|l| l == heading).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn timeline_lists_entries_in_ledger_order() {
        let mut d = dossier();
        d.history.push(history_entry(2, "Resolved", Some("Road relaid"), "2024-03-04T16:45:00Z"));
        let layout = compose(&d, &StubImages::default());
        let lines: Vec<&str> = layout.lines().collect();

        let first = lines
            .iter()
            .position(|l| *l == "01-03-2024 09:15 - Pending: Issue reported by citizen.")
            .unwrap();
        let second = lines
            .iter()
            .position(|l| *l == "04-03-2024 16:45 - Resolved: Road relaid")
            .unwrap();
        assert!(first < second);
    }

    #[test]
    fn optional_sections_are_omitted() {
        let mut d = dossier();
        d.issue.analysis = None;
        d.issue.authority_remarks = None;
        d.history.clear();
        d.latest_feedback = None;
        d.citizen = None;

        let layout = compose(&d, &StubImages::default());
        let lines: Vec<&str> = layout.lines().collect();
        for heading in [
            "AI Analysis Summary",
            "Status Timeline",
            "Authority Remarks",
            "Citizen Feedback",
        ] {
            assert!(!lines.contains(&heading), "{heading} should be absent");
        }
        assert!(lines.contains(&"Citizen Name: Not Provided"));
        assert_eq!(layout.pages.len(), 2);
    }

    #[test]
    fn feedback_shows_rating_and_comment() {
        let mut d = dossier();
        d.latest_feedback = Some(feedback(4, Some("Fixed within a week")));
        let layout = compose(&d, &StubImages::default());
        let lines = page_lines(&layout, 0);
        let at = lines.iter().position(|l| *l == "Citizen Feedback").unwrap();
        assert_eq!(lines[at + 1], "Rating: 4/5");
        assert_eq!(lines[at + 2], "Fixed within a week");
    }

    #[test]
    fn evidence_page_is_last_with_labels_and_footer() {
        let layout = compose(&dossier(), &StubImages::default());
        let last = layout.pages.last().unwrap();
        let lines: Vec<&str> = last.lines().collect();
        assert_eq!(lines, vec![EVIDENCE_HEADING, "Before Fix", "After Fix", FOOTER]);

        let after_label = &last.texts[2];
        assert!((after_label.x - PAGE_WIDTH / 2.0).abs() < 1e-9);
        let footer = last.texts.last().unwrap();
        assert!((footer.y - 15.0 * MM).abs() < 1e-9);
        assert_eq!(footer.size, 8.0);
    }

    #[test]
    fn unreadable_images_are_skipped_but_labels_stay() {
        let mut d = dossier();
        d.issue.before_image = Some(ImageRef::new("static/uploads/before_ok.png").unwrap());
        d.issue.after_image = Some(ImageRef::new("static/uploads/missing.png").unwrap());
        let images = StubImages::with("static/uploads/before_ok.png", solid_image(40, 20));

        let layout = compose(&d, &images);
        let last = layout.pages.last().unwrap();
        assert_eq!(last.images.len(), 1);
        assert!(last.lines().any(|l| l == "After Fix"));
    }

    #[test]
    fn wide_image_fills_slot_width_and_is_centred_vertically() {
        let slot_width = PAGE_WIDTH / 2.0 - 1.5 * MARGIN;
        let placed = fit_into_slot(solid_image(400, 100), MARGIN, 100.0, slot_width, IMAGE_SLOT_HEIGHT)
            .unwrap();
        assert!((placed.width - slot_width).abs() < 1e-9);
        assert!((placed.height - slot_width / 4.0).abs() < 1e-9);
        assert!((placed.x - MARGIN).abs() < 1e-9);
        let expected_y = 100.0 + (IMAGE_SLOT_HEIGHT - placed.height) / 2.0;
        assert!((placed.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn empty_image_is_not_placed() {
        let image = RasterImage {
            width: 0,
            height: 10,
            rgb: Vec::new(),
        };
        assert!(fit_into_slot(image, 0.0, 0.0, 10.0, 10.0).is_none());
    }

    #[test]
    fn long_timeline_continues_on_extra_pages() {
        let mut d = dossier();
        d.history = (1..=120)
            .map(|n| history_entry(n, "In Progress", Some("Crew on site"), "2024-03-02T10:00:00Z"))
            .collect();

        let layout = compose(&d, &StubImages::default());
        assert!(layout.pages.len() > 2);
        for page in &layout.pages {
            for run in &page.texts {
                assert!(run.y > 0.0 && run.y <= PAGE_HEIGHT - MARGIN);
            }
        }
        let timeline_lines = layout
            .lines()
            .filter(|l| l.ends_with("In Progress: Crew on site"))
            .count();
        assert_eq!(timeline_lines, 120);
        assert_eq!(page_lines(&layout, layout.pages.len() - 1)[0], EVIDENCE_HEADING);
    }
}
