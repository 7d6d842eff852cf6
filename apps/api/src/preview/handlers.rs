//! Axum route handlers for the Preview API.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::preview::assembler::{assemble, RenderableSection};
use crate::state::AppState;

/// GET /api/v1/documents/:id/preview
///
/// Sections in canonical order; hidden sections are absent, not empty.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RenderableSection>>, AppError> {
    let session = state.sessions.snapshot(id).await?;
    Ok(Json(assemble(&session.document)))
}
