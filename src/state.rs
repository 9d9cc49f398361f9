//! Shared application state.
//!
//! Handlers receive a [`SharedState`] through axum's `State` extractor.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{config::Config, services::ocr::OcrEngine};

/// Type alias for the state shared with every handler.
///
/// Instead of writing `Arc<AppState>` everywhere, we can use `SharedState`.
pub type SharedState = Arc<AppState>;

/// Everything a request needs besides its own body.
#[derive(Debug)]
pub struct AppState {
    /// Directory holding uploaded statements and `result.csv`
    pub upload_dir: PathBuf,

    /// OCR pipeline for scanned PDFs
    pub ocr: OcrEngine,
}

impl AppState {
    pub fn from_config(config: &Config) -> SharedState {
        Arc::new(Self {
            upload_dir: config.upload_dir.clone(),
            ocr: OcrEngine::from_config(config),
        })
    }
}

/// Create the upload directory (and parents) if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, e.g. because a file
/// with the same name exists or permissions are missing.
pub async fn prepare_upload_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}
