mod config;
mod errors;
mod export;
mod models;
mod preview;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, PdfBackendKind};
use crate::export::print::PrintRenderer;
use crate::export::{DisabledPdfBackend, PdfBackend, PrintpdfBackend};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed env vars abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    let pdf_backend: Arc<dyn PdfBackend> = match config.pdf_backend {
        PdfBackendKind::Printpdf => Arc::new(PrintpdfBackend),
        PdfBackendKind::Disabled => {
            warn!("PDF export disabled; /export/pdf will answer 503");
            Arc::new(DisabledPdfBackend)
        }
    };
    info!(
        "PDF backend: {} (timeout {}s)",
        pdf_backend.name(),
        config.export_timeout_secs
    );

    let print_renderer = Arc::new(PrintRenderer::new()?);
    let sessions = Arc::new(SessionStore::new(config.max_sessions));
    info!("Session store ready (max {} sessions)", config.max_sessions);

    let state = AppState {
        config: config.clone(),
        sessions,
        pdf_backend,
        print_renderer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
