//! Axum route handlers for the Export API.

use anyhow::Context;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::{Html, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{
    content_disposition, document_title, export_pdf, Orientation, PageFormat, PdfOptions,
};
use crate::preview::assembler::assemble;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PrintQuery {
    pub auto_print: Option<bool>,
}

/// Overrides for the default PDF options.
#[derive(Debug, Deserialize)]
pub struct PdfQuery {
    pub margin_in: Option<f64>,
    pub format: Option<PageFormat>,
    pub orientation: Option<Orientation>,
}

impl PdfQuery {
    fn into_options(self) -> PdfOptions {
        let defaults = PdfOptions::default();
        PdfOptions {
            margin_in: self.margin_in.unwrap_or(defaults.margin_in),
            format: self.format.unwrap_or(defaults.format),
            orientation: self.orientation.unwrap_or(defaults.orientation),
            ..defaults
        }
    }
}

/// GET /api/v1/documents/:id/export/print
///
/// Standalone HTML for the browser print dialog.
pub async fn handle_export_print(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PrintQuery>,
) -> Result<Html<String>, AppError> {
    let session = state.sessions.snapshot(id).await?;
    let html = state.print_renderer.render(
        &document_title(&session.document),
        &assemble(&session.document),
        query.auto_print.unwrap_or(true),
    )?;
    Ok(Html(html))
}

/// GET /api/v1/documents/:id/export/pdf
///
/// Renders the document through the configured PDF backend and returns it as an
/// attachment. Backend failures are reported, never swallowed.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PdfQuery>,
) -> Result<Response, AppError> {
    let session = state.sessions.snapshot(id).await?;
    let export = export_pdf(
        state.pdf_backend.as_ref(),
        &session.document,
        query.into_options(),
        state.config.export_timeout(),
    )
    .await?;

    let response = axum::http::Response::builder()
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&export.filename),
        )
        .body(Body::from(export.bytes))
        .context("failed to build PDF response")?;
    Ok(response)
}
