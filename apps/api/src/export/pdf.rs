//! printpdf backend. Lays out assembled sections on US letter / A4 pages
//! using the built-in Helvetica faces.
//!
//! printpdf documents are `Rc`-based and CPU-bound to build, so rendering runs
//! inside `tokio::task::spawn_blocking` and only the finished bytes cross threads.

use std::io::BufWriter;

use async_trait::async_trait;
use printpdf::{
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point,
};
use tracing::debug;

use crate::export::font_metrics::{first_undrawable, get_metrics, Face, MM_PER_PT};
use crate::export::{ExportError, PdfBackend, PdfOptions};
use crate::preview::assembler::{
    EducationEntryBlock, HeaderBlock, RenderableSection, WorkEntryBlock,
};

const NAME_SIZE: f64 = 18.0;
const SECTION_TITLE_SIZE: f64 = 13.0;
const ENTRY_TITLE_SIZE: f64 = 11.0;
const BODY_SIZE: f64 = 10.0;
const LINE_SPACING: f64 = 1.35;
const SECTION_GAP_MM: f64 = 5.0;
const ENTRY_GAP_MM: f64 = 3.0;
const BULLET_INDENT_MM: f64 = 5.0;
const LAYER_NAME: &str = "Resume";

pub struct PrintpdfBackend;

#[async_trait]
impl PdfBackend for PrintpdfBackend {
    fn name(&self) -> &'static str {
        "printpdf"
    }

    async fn render(
        &self,
        title: String,
        sections: Vec<RenderableSection>,
        options: PdfOptions,
    ) -> Result<Vec<u8>, ExportError> {
        tokio::task::spawn_blocking(move || render_pdf(&title, &sections, &options))
            .await
            .map_err(|e| ExportError::BackendUnavailable(format!("render task failed: {e}")))?
    }
}

/// Renders sections into a complete PDF file.
///
/// Fails with `UnsupportedText` before drawing anything if some text falls
/// outside what the built-in faces can encode.
pub fn render_pdf(
    title: &str,
    sections: &[RenderableSection],
    options: &PdfOptions,
) -> Result<Vec<u8>, ExportError> {
    ensure_drawable(sections)?;

    let mut canvas = Canvas::new(title, options)?;

    for section in sections {
        if let Some(heading) = section.title() {
            canvas.gap(SECTION_GAP_MM);
            canvas.section_title(heading);
        }
        match section {
            RenderableSection::Header(header) => canvas.header(header),
            RenderableSection::Summary(text) => canvas.paragraph(text, Face::Regular, BODY_SIZE, 0.0),
            RenderableSection::WorkExperience(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        canvas.gap(ENTRY_GAP_MM);
                    }
                    canvas.work_entry(entry);
                }
            }
            RenderableSection::Education(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        canvas.gap(ENTRY_GAP_MM);
                    }
                    canvas.education_entry(entry);
                }
            }
            RenderableSection::Skills(skills) => {
                canvas.paragraph(&skills.join("  •  "), Face::Regular, BODY_SIZE, 0.0)
            }
        }
    }

    debug!("Laid out {} sections on {} pages", sections.len(), canvas.pages);
    canvas.finish()
}

fn ensure_drawable(sections: &[RenderableSection]) -> Result<(), ExportError> {
    for section in sections {
        for (context, text) in section_texts(section) {
            if let Some(character) = first_undrawable(text) {
                return Err(ExportError::UnsupportedText {
                    character,
                    context: context.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Every user-supplied string the canvas will draw for `section`, labelled.
fn section_texts(section: &RenderableSection) -> Vec<(&'static str, &str)> {
    let mut texts = Vec::new();
    match section {
        RenderableSection::Header(header) => {
            texts.push(("name", header.name.as_str()));
            texts.extend(header.email.as_deref().map(|e| ("email", e)));
            texts.extend(header.contact_line.iter().map(|c| ("contact details", c.as_str())));
        }
        RenderableSection::Summary(text) => texts.push(("summary", text.as_str())),
        RenderableSection::WorkExperience(entries) => {
            for entry in entries {
                if let Some(header) = &entry.header {
                    texts.extend(header.position.as_deref().map(|t| ("position", t)));
                    texts.extend(header.company.as_deref().map(|t| ("company", t)));
                    texts.extend(header.date_range.as_deref().map(|t| ("work dates", t)));
                }
                texts.extend(entry.description.as_deref().map(|t| ("work description", t)));
                texts.extend(entry.achievements.iter().map(|t| ("achievements", t.as_str())));
            }
        }
        RenderableSection::Education(entries) => {
            for entry in entries {
                if let Some(header) = &entry.header {
                    texts.extend(header.credentials.iter().map(|t| ("degree", t.as_str())));
                    texts.extend(header.institution.as_deref().map(|t| ("institution", t)));
                    texts.extend(header.graduation_date.as_deref().map(|t| ("graduation date", t)));
                }
                texts.extend(entry.description.as_deref().map(|t| ("education description", t)));
            }
        }
        RenderableSection::Skills(skills) => {
            texts.extend(skills.iter().map(|t| ("skills", t.as_str())))
        }
    }
    texts
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas: a top-down text cursor with automatic page breaks
// ────────────────────────────────────────────────────────────────────────────

struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    width: f64,
    height: f64,
    margin: f64,
    /// Distance of the cursor from the bottom edge, in mm.
    y: f64,
    pages: usize,
}

impl Canvas {
    fn new(title: &str, options: &PdfOptions) -> Result<Self, ExportError> {
        let (width, height) = options.page_size_mm();
        let margin = options.margin_mm();

        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), LAYER_NAME);
        let regular = doc
            .add_builtin_font(Face::Regular.builtin())
            .map_err(|e| ExportError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(Face::Bold.builtin())
            .map_err(|e| ExportError::Render(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Canvas {
            doc,
            layer,
            regular,
            bold,
            width,
            height,
            margin,
            y: height - margin,
            pages: 1,
        })
    }

    fn text_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    fn font(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        }
    }

    fn ensure_space(&mut self, needed: f64) {
        if self.y - needed >= self.margin {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(self.width), Mm(self.height), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = self.height - self.margin;
        self.pages += 1;
    }

    fn gap(&mut self, mm: f64) {
        self.y -= mm;
    }

    /// Writes one line at `x`, with an optional right-aligned trailer on the same baseline.
    fn line(&mut self, text: &str, face: Face, size: f64, x: f64, trailer: Option<&str>) {
        let advance = size * LINE_SPACING * MM_PER_PT;
        self.ensure_space(advance);
        let baseline = self.y - size * MM_PER_PT;

        self.layer
            .use_text(text, size, Mm(x), Mm(baseline), self.font(face));
        if let Some(trailer) = trailer {
            let trailer_width = get_metrics(Face::Regular).measure_mm(trailer, BODY_SIZE);
            let trailer_x = self.width - self.margin - trailer_width;
            self.layer.use_text(
                trailer,
                BODY_SIZE,
                Mm(trailer_x),
                Mm(baseline),
                self.font(Face::Regular),
            );
        }
        self.y -= advance;
    }

    fn centered(&mut self, text: &str, face: Face, size: f64) {
        let text_width = get_metrics(face).measure_mm(text, size);
        let x = ((self.width - text_width) / 2.0).max(self.margin);
        self.line(text, face, size, x, None);
    }

    fn paragraph(&mut self, text: &str, face: Face, size: f64, indent: f64) {
        let x = self.margin + indent;
        for line in get_metrics(face).wrap(text, size, self.text_width() - indent) {
            self.line(&line, face, size, x, None);
        }
    }

    fn bullet(&mut self, text: &str) {
        let lines = get_metrics(Face::Regular).wrap(text, BODY_SIZE, self.text_width() - BULLET_INDENT_MM);
        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                let advance = BODY_SIZE * LINE_SPACING * MM_PER_PT;
                self.ensure_space(advance);
                let baseline = self.y - BODY_SIZE * MM_PER_PT;
                self.layer.use_text(
                    "•",
                    BODY_SIZE,
                    Mm(self.margin + 1.0),
                    Mm(baseline),
                    self.font(Face::Regular),
                );
            }
            self.line(line, Face::Regular, BODY_SIZE, self.margin + BULLET_INDENT_MM, None);
        }
    }

    fn section_title(&mut self, heading: &str) {
        self.line(heading, Face::Bold, SECTION_TITLE_SIZE, self.margin, None);
        let rule_y = self.y + 0.8;
        self.layer.set_outline_thickness(0.5);
        self.layer.add_shape(Line {
            points: vec![
                (Point::new(Mm(self.margin), Mm(rule_y)), false),
                (Point::new(Mm(self.width - self.margin), Mm(rule_y)), false),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
        self.gap(1.5);
    }

    fn header(&mut self, header: &HeaderBlock) {
        self.centered(&header.name, Face::Bold, NAME_SIZE);
        if let Some(email) = &header.email {
            self.centered(email, Face::Regular, BODY_SIZE);
        }
        if !header.contact_line.is_empty() {
            self.centered(&header.contact_line.join("    "), Face::Regular, BODY_SIZE);
        }
    }

    fn work_entry(&mut self, entry: &WorkEntryBlock) {
        if let Some(header) = &entry.header {
            let dates = header.date_range.as_deref();
            match (&header.position, &header.company) {
                (Some(position), company) => {
                    self.line(position, Face::Bold, ENTRY_TITLE_SIZE, self.margin, dates);
                    if let Some(company) = company {
                        self.line(company, Face::Regular, BODY_SIZE, self.margin, None);
                    }
                }
                (None, Some(company)) => {
                    self.line(company, Face::Regular, BODY_SIZE, self.margin, dates);
                }
                (None, None) => {}
            }
        }
        if let Some(description) = &entry.description {
            self.paragraph(description, Face::Regular, BODY_SIZE, 0.0);
        }
        for achievement in &entry.achievements {
            self.bullet(achievement);
        }
    }

    fn education_entry(&mut self, entry: &EducationEntryBlock) {
        if let Some(header) = &entry.header {
            let mut trailer = header.graduation_date.as_deref();
            for credential in &header.credentials {
                self.line(credential, Face::Bold, ENTRY_TITLE_SIZE, self.margin, trailer.take());
            }
            if let Some(institution) = &header.institution {
                self.line(institution, Face::Regular, BODY_SIZE, self.margin, trailer.take());
            }
            if let Some(date) = trailer {
                self.line(date, Face::Regular, BODY_SIZE, self.margin, None);
            }
        }
        if let Some(description) = &entry.description {
            self.paragraph(description, Face::Regular, BODY_SIZE, 0.0);
        }
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        let Canvas { doc, layer, .. } = self;
        drop(layer);

        let mut writer = BufWriter::new(Vec::new());
        doc.save(&mut writer)
            .map_err(|e| ExportError::Render(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| ExportError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{Orientation, PageFormat};
    use crate::models::{Document, EducationField, PersonalField, WorkField};
    use crate::preview::assembler::assemble;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.set_personal(PersonalField::Name, "Ada Lovelace");
        doc.set_personal(PersonalField::Email, "ada@example.com");
        doc.set_personal(PersonalField::Location, "London");
        doc.set_summary("Analyst of engines, writer of the first published algorithm.");
        let exp = doc.work_experience[0].id;
        doc.update_work_experience(exp, WorkField::Position, "Engineer");
        doc.update_work_experience(exp, WorkField::Company, "Analytical Engines Ltd");
        doc.update_work_experience(exp, WorkField::StartDate, "01/1842");
        doc.update_work_experience(exp, WorkField::EndDate, "Present");
        doc.update_work_experience(exp, WorkField::Achievements, "• Wrote Note G\n• Described loops");
        let edu = doc.education[0].id;
        doc.update_education(edu, EducationField::Degree, "BS");
        doc.update_education(edu, EducationField::Field, "Mathematics");
        doc.set_skills("Mathematics, Analysis, Poetry");
        doc
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let doc = sample_document();
        let bytes = render_pdf("Ada Lovelace - Resume", &assemble(&doc), &PdfOptions::default())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"), "missing PDF signature");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_blank_document() {
        let bytes = render_pdf("Your Name - Resume", &assemble(&Document::new()), &PdfOptions::default())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_document_breaks_pages() {
        let mut doc = sample_document();
        let exp = doc.work_experience[0].id;
        let many = (0..200)
            .map(|i| format!("• Achievement number {i} with measurable impact"))
            .collect::<Vec<_>>()
            .join("\n");
        doc.update_work_experience(exp, WorkField::Achievements, many);

        let options = PdfOptions {
            format: PageFormat::A4,
            orientation: Orientation::Landscape,
            ..PdfOptions::default()
        };
        let mut canvas = Canvas::new("Long", &options).unwrap();
        for section in assemble(&doc) {
            if let RenderableSection::WorkExperience(entries) = section {
                canvas.work_entry(&entries[0]);
            }
        }
        assert!(canvas.pages > 1, "expected pagination, got {} page(s)", canvas.pages);
        assert!(canvas.finish().unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_accented_latin_renders() {
        let mut doc = Document::new();
        doc.set_personal(PersonalField::Name, "Zoë Müller");
        doc.set_summary("Café owner – naïve “quotes” included.");
        let bytes = render_pdf("Zoë Müller - Resume", &assemble(&doc), &PdfOptions::default())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_text_outside_font_encoding_is_rejected() {
        let mut doc = Document::new();
        doc.set_personal(PersonalField::Name, "李雷");
        match render_pdf("t", &assemble(&doc), &PdfOptions::default()) {
            Err(ExportError::UnsupportedText { character, context }) => {
                assert_eq!(character, '李');
                assert_eq!(context, "name");
            }
            other => panic!("expected UnsupportedText, got {other:?}"),
        }

        let mut doc = Document::new();
        doc.set_summary("Łódź – Kraków");
        let err = render_pdf("t", &assemble(&doc), &PdfOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ExportError::UnsupportedText { character: 'Ł', .. }
        ));

        let mut doc = sample_document();
        doc.set_skills("Rust, Zieliński method");
        let err = render_pdf("t", &assemble(&doc), &PdfOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ExportError::UnsupportedText { character: 'ń', .. }
        ));
    }

    #[tokio::test]
    async fn test_backend_renders_off_thread() {
        let doc = sample_document();
        let bytes = PrintpdfBackend
            .render("t".to_string(), assemble(&doc), PdfOptions::default())
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
