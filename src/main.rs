//! Statement Extractor - Main Application Entry Point
//!
//! A web upload form for bank and credit-card statements. An uploaded PDF or
//! DOCX is turned into text, candidate transaction fields are matched with
//! regular expressions, and the rows are shown as a table and exported as CSV.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server, multipart uploads)
//! - **PDF text**: pdf-extract, with a pdftoppm + tesseract OCR fallback
//! - **DOCX text**: zip container + `word/document.xml`
//! - **Export**: CSV via the `csv` crate
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create the upload directory
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod views;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        ocr_dpi = config.ocr_dpi,
        "Configuration loaded"
    );

    state::prepare_upload_dir(&config.upload_dir).await?;
    tracing::info!("Upload directory ready");

    let app = routes::router(
        state::AppState::from_config(&config),
        config.max_upload_bytes,
    );

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
