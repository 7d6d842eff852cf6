use std::sync::Arc;

use crate::config::Config;
use crate::export::print::PrintRenderer;
use crate::export::PdfBackend;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Every open editing session and the document it owns.
    pub sessions: Arc<SessionStore>,
    /// Pluggable PDF renderer. Default: PrintpdfBackend. Swap via PDF_BACKEND env.
    pub pdf_backend: Arc<dyn PdfBackend>,
    pub print_renderer: Arc<PrintRenderer>,
}
