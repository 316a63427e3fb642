// src/infrastructure/report/pdf.rs
//! Minimal PDF 1.4 serializer for a [`ReportLayout`]. Output depends only on the
//! layout, so equal layouts produce equal bytes.
use super::layout::{PAGE_HEIGHT, PAGE_WIDTH, Page, PlacedImage, ReportLayout};
use super::metrics::Font;
use crate::application::error::{ApplicationError, ApplicationResult};
use flate2::{Compression, write::ZlibEncoder};
use std::fmt::Write as _;
use std::io::Write as _;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONTS: [(Font, usize); 2] = [(Font::Helvetica, 3), (Font::HelveticaBold, 4)];
const FIRST_PAGE_ID: usize = 5;

/// Byte for `c` in WinAnsiEncoding. Printable ASCII and the Latin-1 range map
/// to themselves; everything else becomes `?`.
pub fn win_ansi_byte(c: char) -> u8 {
    match u8::try_from(u32::from(c)) {
        Ok(byte @ (0x20..=0x7E | 0xA0..=0xFF)) => byte,
        _ => b'?',
    }
}

fn push_text_literal(out: &mut Vec<u8>, text: &str) {
    out.push(b'(');
    for c in text.chars() {
        let byte = win_ansi_byte(c);
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
}

/// Two decimals at most, no trailing zeros.
fn num(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

struct PageObjects {
    page_id: usize,
    content_id: usize,
    image_ids: Vec<usize>,
}

fn allocate(layout: &ReportLayout) -> Vec<PageObjects> {
    let mut next = FIRST_PAGE_ID;
    layout
        .pages
        .iter()
        .map(|page| {
            let objects = PageObjects {
                page_id: next,
                content_id: next + 1,
                image_ids: (next + 2..next + 2 + page.images.len()).collect(),
            };
            next = objects.content_id + 1 + page.images.len();
            objects
        })
        .collect()
}

struct PdfWriter {
    out: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut out = Vec::with_capacity(16 * 1024);
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            out,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &str) {
        self.open(id);
        self.out.extend_from_slice(body.as_bytes());
        self.out.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, id: usize, dict_entries: &str, data: &[u8]) {
        self.open(id);
        let _ = write!(
            self.out,
            "<< {dict_entries}/Length {} >>\nstream\n",
            data.len()
        );
        self.out.extend_from_slice(data);
        self.out.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn open(&mut self, id: usize) {
        debug_assert_eq!(id, self.offsets.len() + 1, "objects are written in id order");
        self.offsets.push(self.out.len());
        let _ = writeln!(self.out, "{id} 0 obj");
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_at = self.out.len();
        let count = self.offsets.len() + 1;
        let mut xref = format!("xref\n0 {count}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {count} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        );
        self.out.extend_from_slice(xref.as_bytes());
        self.out
    }
}

fn content_stream(page: &Page) -> Vec<u8> {
    let mut out = Vec::new();
    for (index, image) in page.images.iter().enumerate() {
        let _ = writeln!(
            out,
            "q {} 0 0 {} {} {} cm /Im{} Do Q",
            num(image.width),
            num(image.height),
            num(image.x),
            num(image.y),
            index + 1
        );
    }
    for run in &page.texts {
        let _ = write!(
            out,
            "BT /{} {} Tf {} {} Td ",
            run.font.resource_name(),
            num(run.size),
            num(run.x),
            num(run.y)
        );
        push_text_literal(&mut out, &run.text);
        out.extend_from_slice(b" Tj ET\n");
    }
    out
}

fn compress_pixels(image: &PlacedImage) -> ApplicationResult<Vec<u8>> {
    let raster = &image.image;
    let expected = raster.width as usize * raster.height as usize * 3;
    if raster.rgb.len() != expected {
        return Err(ApplicationError::rendering(format!(
            "image buffer holds {} bytes, expected {expected} for {}x{}",
            raster.rgb.len(),
            raster.width,
            raster.height
        )));
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&raster.rgb)
        .and_then(|()| encoder.finish())
        .map_err(|err| ApplicationError::rendering(err.to_string()))
}

pub fn serialize(layout: &ReportLayout) -> ApplicationResult<Vec<u8>> {
    if layout.pages.is_empty() {
        return Err(ApplicationError::rendering("report has no pages"));
    }
    let objects = allocate(layout);
    let mut writer = PdfWriter::new();

    writer.object(
        CATALOG_ID,
        &format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>"),
    );
    let kids = objects
        .iter()
        .map(|o| format!("{} 0 R", o.page_id))
        .collect::<Vec<_>>()
        .join(" ");
    writer.object(
        PAGES_ID,
        &format!(
            "<< /Type /Pages /Kids [{kids}] /Count {} >>",
            objects.len()
        ),
    );
    for (font, id) in FONTS {
        writer.object(
            id,
            &format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_name()
            ),
        );
    }

    let fonts = FONTS
        .iter()
        .map(|(font, id)| format!("/{} {id} 0 R", font.resource_name()))
        .collect::<Vec<_>>()
        .join(" ");

    for (page, ids) in layout.pages.iter().zip(&objects) {
        let xobjects = ids
            .image_ids
            .iter()
            .enumerate()
            .map(|(index, id)| format!("/Im{} {id} 0 R", index + 1))
            .collect::<Vec<_>>()
            .join(" ");
        let resources = if xobjects.is_empty() {
            format!("<< /Font << {fonts} >> >>")
        } else {
            format!("<< /Font << {fonts} >> /XObject << {xobjects} >> >>")
        };
        writer.object(
            ids.page_id,
            &format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {} {}] /Resources {resources} /Contents {} 0 R >>",
                num(PAGE_WIDTH),
                num(PAGE_HEIGHT),
                ids.content_id
            ),
        );
        writer.stream(ids.content_id, "", &content_stream(page));

        for (image, id) in page.images.iter().zip(&ids.image_ids) {
            let data = compress_pixels(image)?;
            writer.stream(
                *id,
                &format!(
                    "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode ",
                    image.image.width, image.image.height
                ),
                &data,
            );
        }
    }

    Ok(writer.finish())
}
