pub mod health;
pub mod tips;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::preview::handlers as preview;
use crate::session::handlers as documents;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tips", get(tips::tips_handler))
        // Document sessions
        .route("/api/v1/documents", post(documents::handle_create_document))
        .route(
            "/api/v1/documents/:id",
            get(documents::handle_get_document)
                .put(documents::handle_replace_document)
                .delete(documents::handle_end_session),
        )
        .route(
            "/api/v1/documents/:id/personal",
            patch(documents::handle_update_personal),
        )
        .route(
            "/api/v1/documents/:id/summary",
            put(documents::handle_update_summary),
        )
        .route(
            "/api/v1/documents/:id/skills",
            put(documents::handle_update_skills),
        )
        .route("/api/v1/documents/:id/work", post(documents::handle_add_work))
        .route(
            "/api/v1/documents/:id/work/:entry_id",
            patch(documents::handle_update_work).delete(documents::handle_remove_work),
        )
        .route(
            "/api/v1/documents/:id/education",
            post(documents::handle_add_education),
        )
        .route(
            "/api/v1/documents/:id/education/:entry_id",
            patch(documents::handle_update_education).delete(documents::handle_remove_education),
        )
        // Preview and export
        .route("/api/v1/documents/:id/preview", get(preview::handle_preview))
        .route(
            "/api/v1/documents/:id/export/print",
            get(export::handle_export_print),
        )
        .route(
            "/api/v1/documents/:id/export/pdf",
            get(export::handle_export_pdf),
        )
        .with_state(state)
}
