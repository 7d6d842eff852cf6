//! Export adapters: print-ready HTML and PDF.
//!
//! Both consume the assembled `RenderableSection` list, never the raw document.
//! PDF rendering is pluggable through `PdfBackend`; `AppState` carries an
//! `Arc<dyn PdfBackend>` chosen at startup via `PDF_BACKEND`.

pub mod font_metrics;
pub mod handlers;
pub mod pdf;
pub mod print;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::Document;
use crate::preview::assembler::{assemble, RenderableSection};

pub use pdf::PrintpdfBackend;

const MM_PER_INCH: f64 = 25.4;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("export timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("render failed: {0}")]
    Render(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("invalid export options: {0}")]
    InvalidOptions(String),

    /// The document holds a character the PDF fonts cannot draw.
    #[error("unsupported character {character:?} in {context}")]
    UnsupportedText { character: char, context: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Options
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFormat {
    #[default]
    Letter,
    A4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// PDF export configuration. Defaults: 0.5in margin, JPEG at 0.98 quality,
/// raster scale 2, US letter, portrait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfOptions {
    pub margin_in: f64,
    pub image_type: String,
    pub image_quality: f64,
    pub scale: f64,
    pub format: PageFormat,
    pub orientation: Orientation,
}

impl Default for PdfOptions {
    fn default() -> Self {
        PdfOptions {
            margin_in: 0.5,
            image_type: "jpeg".to_string(),
            image_quality: 0.98,
            scale: 2.0,
            format: PageFormat::Letter,
            orientation: Orientation::Portrait,
        }
    }
}

impl PdfOptions {
    /// Page size in millimetres `(width, height)` after applying orientation.
    pub fn page_size_mm(&self) -> (f64, f64) {
        let (short, long) = match self.format {
            PageFormat::Letter => (215.9, 279.4),
            PageFormat::A4 => (210.0, 297.0),
        };
        match self.orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }

    pub fn margin_mm(&self) -> f64 {
        self.margin_in * MM_PER_INCH
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        let (width, height) = self.page_size_mm();
        let shorter_side = width.min(height);
        if !(self.margin_in >= 0.0 && self.margin_mm() * 2.0 < shorter_side) {
            return Err(ExportError::InvalidOptions(format!(
                "margin of {}in leaves no printable area",
                self.margin_in
            )));
        }
        if !(self.image_quality > 0.0 && self.image_quality <= 1.0) {
            return Err(ExportError::InvalidOptions(format!(
                "image quality must be in (0, 1], got {}",
                self.image_quality
            )));
        }
        if !(self.scale > 0.0) {
            return Err(ExportError::InvalidOptions(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend trait
// ────────────────────────────────────────────────────────────────────────────

/// Converts assembled sections into PDF bytes. Implement this to swap the
/// renderer without touching handlers.
#[async_trait]
pub trait PdfBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn render(
        &self,
        title: String,
        sections: Vec<RenderableSection>,
        options: PdfOptions,
    ) -> Result<Vec<u8>, ExportError>;
}

/// Backend installed with `PDF_BACKEND=disabled`; every export reports unavailability.
pub struct DisabledPdfBackend;

#[async_trait]
impl PdfBackend for DisabledPdfBackend {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn render(
        &self,
        _title: String,
        _sections: Vec<RenderableSection>,
        _options: PdfOptions,
    ) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::BackendUnavailable(
            "PDF export is disabled in this deployment".to_string(),
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Export entry point
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PdfExport {
    pub filename: String,
    pub bytes: Bytes,
}

/// Assembles the document and renders it through `backend`, bounded by `timeout`.
///
/// Dropping the returned future abandons the export.
pub async fn export_pdf(
    backend: &dyn PdfBackend,
    document: &Document,
    options: PdfOptions,
    timeout: Duration,
) -> Result<PdfExport, ExportError> {
    options.validate()?;

    let sections = assemble(document);
    let title = document_title(document);
    let filename = pdf_filename(document);

    let bytes = tokio::time::timeout(timeout, backend.render(title, sections, options))
        .await
        .map_err(|_| ExportError::Timeout {
            seconds: timeout.as_secs(),
        })??;

    info!(
        "Exported {filename} via {} backend ({} bytes)",
        backend.name(),
        bytes.len()
    );

    Ok(PdfExport {
        filename,
        bytes: Bytes::from(bytes),
    })
}

/// `"{name} - Resume"`, where `name` is the name the header shows on the page.
///
/// A blank name gives `"Your Name - Resume"`, matching the placeholder heading
/// rather than a bare `" - Resume"`.
pub fn document_title(document: &Document) -> String {
    let name = document
        .personal_info
        .name
        .as_deref()
        .unwrap_or(crate::preview::assembler::PLACEHOLDER_NAME);
    format!("{name} - Resume")
}

/// `"{name}.pdf"`, or `"resume.pdf"` when the name is blank.
pub fn pdf_filename(document: &Document) -> String {
    match document.personal_info.name.as_deref() {
        Some(name) => format!("{name}.pdf"),
        None => "resume.pdf".to_string(),
    }
}

/// Builds a `Content-Disposition` value carrying both an ASCII fallback and the
/// RFC 5987 UTF-8 filename.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len());
    for byte in filename.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonalField;

    struct SlowBackend;

    #[async_trait]
    impl PdfBackend for SlowBackend {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn render(
            &self,
            _title: String,
            _sections: Vec<RenderableSection>,
            _options: PdfOptions,
        ) -> Result<Vec<u8>, ExportError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    struct FixedBackend;

    #[async_trait]
    impl PdfBackend for FixedBackend {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn render(
            &self,
            title: String,
            sections: Vec<RenderableSection>,
            _options: PdfOptions,
        ) -> Result<Vec<u8>, ExportError> {
            Ok(format!("{title}|{}", sections.len()).into_bytes())
        }
    }

    #[test]
    fn test_default_options() {
        let options = PdfOptions::default();
        assert_eq!(options.margin_in, 0.5);
        assert_eq!(options.image_type, "jpeg");
        assert_eq!(options.image_quality, 0.98);
        assert_eq!(options.scale, 2.0);
        assert_eq!(options.format, PageFormat::Letter);
        assert_eq!(options.orientation, Orientation::Portrait);
        assert!(options.validate().is_ok());
        assert!((options.margin_mm() - 12.7).abs() < 1e-9);
    }

    #[test]
    fn test_landscape_swaps_page_size() {
        let options = PdfOptions {
            orientation: Orientation::Landscape,
            ..PdfOptions::default()
        };
        assert_eq!(options.page_size_mm(), (279.4, 215.9));
    }

    #[test]
    fn test_validate_rejects_oversized_margin() {
        let options = PdfOptions {
            margin_in: 5.0,
            ..PdfOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ExportError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_quality_and_scale() {
        let quality = PdfOptions {
            image_quality: 1.5,
            ..PdfOptions::default()
        };
        assert!(quality.validate().is_err());

        let scale = PdfOptions {
            scale: 0.0,
            ..PdfOptions::default()
        };
        assert!(scale.validate().is_err());
    }

    #[test]
    fn test_filename_falls_back_when_name_blank() {
        let mut doc = Document::new();
        assert_eq!(pdf_filename(&doc), "resume.pdf");
        doc.set_personal(PersonalField::Name, "Ada Lovelace");
        assert_eq!(pdf_filename(&doc), "Ada Lovelace.pdf");
    }

    #[test]
    fn test_title_matches_header_name() {
        let mut doc = Document::new();
        let shown = match &assemble(&doc)[0] {
            RenderableSection::Header(header) => header.name.clone(),
            other => panic!("expected header first, got {other:?}"),
        };
        assert_eq!(document_title(&doc), format!("{shown} - Resume"));
        assert_eq!(document_title(&doc), "Your Name - Resume");
        doc.set_personal(PersonalField::Name, "Ada");
        assert_eq!(document_title(&doc), "Ada - Resume");
    }

    #[test]
    fn test_content_disposition_encodes_non_ascii() {
        assert_eq!(
            content_disposition("José \"J\".pdf"),
            "attachment; filename=\"Jos_ _J_.pdf\"; filename*=UTF-8''Jos%C3%A9%20%22J%22.pdf"
        );
        assert_eq!(
            content_disposition("resume.pdf"),
            "attachment; filename=\"resume.pdf\"; filename*=UTF-8''resume.pdf"
        );
    }

    #[tokio::test]
    async fn test_export_passes_title_and_sections() {
        let mut doc = Document::new();
        doc.set_personal(PersonalField::Name, "Ada");
        doc.set_summary("Mathematician");

        let export = export_pdf(&FixedBackend, &doc, PdfOptions::default(), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(export.filename, "Ada.pdf");
        assert_eq!(&export.bytes[..], b"Ada - Resume|2");
    }

    #[tokio::test]
    async fn test_disabled_backend_reports_unavailable() {
        let result = export_pdf(
            &DisabledPdfBackend,
            &Document::new(),
            PdfOptions::default(),
            Duration::from_secs(5),
        )
        .await;
        assert!(matches!(result, Err(ExportError::BackendUnavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_backend_times_out() {
        let result = export_pdf(
            &SlowBackend,
            &Document::new(),
            PdfOptions::default(),
            Duration::from_secs(30),
        )
        .await;
        assert!(matches!(result, Err(ExportError::Timeout { seconds: 30 })));
    }

    #[tokio::test]
    async fn test_invalid_options_fail_before_rendering() {
        let options = PdfOptions {
            scale: -1.0,
            ..PdfOptions::default()
        };
        let result =
            export_pdf(&SlowBackend, &Document::new(), options, Duration::from_secs(30)).await;
        assert!(matches!(result, Err(ExportError::InvalidOptions(_))));
    }
}
