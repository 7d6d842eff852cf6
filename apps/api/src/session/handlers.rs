//! Axum route handlers for document editing.
//!
//! Every handler is a thin wrapper over one `Document` operation executed
//! inside `SessionStore::edit`; the response carries the updated session so
//! clients never need a follow-up read.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Document, EducationField, EntryId, PersonalField, Removal, WorkField};
use crate::session::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FieldUpdate<F> {
    pub field: F,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct TextUpdate {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct EntryAddedResponse {
    pub entry_id: EntryId,
    pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct EntryRemovedResponse {
    pub removed: bool,
    pub outcome: Removal,
    pub session: Session,
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents
pub async fn handle_create_document(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let session = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.sessions.snapshot(id).await?))
}

/// PUT /api/v1/documents/:id
///
/// Replaces the whole document. Empty entry lists and duplicate entry ids are
/// rejected before the session is touched.
pub async fn handle_replace_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Session>, AppError> {
    let document: Document = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid document: {e}")))?;
    let (_, session) = state
        .sessions
        .edit(id, move |doc| *doc = document)
        .await?;
    Ok(Json(session))
}

/// DELETE /api/v1/documents/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.end(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar fields
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/documents/:id/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FieldUpdate<PersonalField>>,
) -> Result<Json<Session>, AppError> {
    let (_, session) = state
        .sessions
        .edit(id, move |doc| doc.set_personal(update.field, update.value))
        .await?;
    Ok(Json(session))
}

/// PUT /api/v1/documents/:id/summary
pub async fn handle_update_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<TextUpdate>,
) -> Result<Json<Session>, AppError> {
    let (_, session) = state
        .sessions
        .edit(id, move |doc| doc.set_summary(update.value))
        .await?;
    Ok(Json(session))
}

/// PUT /api/v1/documents/:id/skills
pub async fn handle_update_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<TextUpdate>,
) -> Result<Json<Session>, AppError> {
    let (_, session) = state
        .sessions
        .edit(id, move |doc| doc.set_skills(update.value))
        .await?;
    Ok(Json(session))
}

// ────────────────────────────────────────────────────────────────────────────
// Work experience entries
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/:id/work
pub async fn handle_add_work(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<EntryAddedResponse>), AppError> {
    let (entry_id, session) = state.sessions.edit(id, Document::add_work_experience).await?;
    Ok((
        StatusCode::CREATED,
        Json(EntryAddedResponse { entry_id, session }),
    ))
}

/// PATCH /api/v1/documents/:id/work/:entry_id
pub async fn handle_update_work(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
    Json(update): Json<FieldUpdate<WorkField>>,
) -> Result<Json<Session>, AppError> {
    let (found, session) = state
        .sessions
        .edit(id, move |doc| {
            doc.update_work_experience(entry_id, update.field, update.value)
        })
        .await?;
    if !found {
        return Err(entry_not_found(entry_id));
    }
    Ok(Json(session))
}

/// DELETE /api/v1/documents/:id/work/:entry_id
///
/// Removing the last remaining entry is a no-op reported as `removed: false`.
pub async fn handle_remove_work(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
) -> Result<Json<EntryRemovedResponse>, AppError> {
    let (outcome, session) = state
        .sessions
        .edit(id, move |doc| doc.remove_work_experience(entry_id))
        .await?;
    removal_response(entry_id, outcome, session)
}

// ────────────────────────────────────────────────────────────────────────────
// Education entries
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/:id/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<EntryAddedResponse>), AppError> {
    let (entry_id, session) = state.sessions.edit(id, Document::add_education).await?;
    Ok((
        StatusCode::CREATED,
        Json(EntryAddedResponse { entry_id, session }),
    ))
}

/// PATCH /api/v1/documents/:id/education/:entry_id
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
    Json(update): Json<FieldUpdate<EducationField>>,
) -> Result<Json<Session>, AppError> {
    let (found, session) = state
        .sessions
        .edit(id, move |doc| {
            doc.update_education(entry_id, update.field, update.value)
        })
        .await?;
    if !found {
        return Err(entry_not_found(entry_id));
    }
    Ok(Json(session))
}

/// DELETE /api/v1/documents/:id/education/:entry_id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
) -> Result<Json<EntryRemovedResponse>, AppError> {
    let (outcome, session) = state
        .sessions
        .edit(id, move |doc| doc.remove_education(entry_id))
        .await?;
    removal_response(entry_id, outcome, session)
}

fn removal_response(
    entry_id: EntryId,
    outcome: Removal,
    session: Session,
) -> Result<Json<EntryRemovedResponse>, AppError> {
    match outcome {
        Removal::NotFound => Err(entry_not_found(entry_id)),
        Removal::Removed | Removal::LastEntryKept => Ok(Json(EntryRemovedResponse {
            removed: outcome == Removal::Removed,
            outcome,
            session,
        })),
    }
}

fn entry_not_found(entry_id: EntryId) -> AppError {
    AppError::NotFound(format!("Entry {entry_id} not found"))
}
