//! Liveness probe for the statement extractor.
//!
//! Uploads and `result.csv` both live in the upload directory, so the
//! service is only useful while that directory is present.

use crate::{error::AppError, state::SharedState};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,

    /// `"ready"` once the upload directory is usable
    pub upload_dir: String,

    pub timestamp: DateTime<Utc>,
}

/// Report whether uploads can be stored.
///
/// Answers `{"status": "healthy", "upload_dir": "ready", ...}` when the
/// configured upload directory exists. A missing directory, or a file in
/// its place, is an internal error (500): uploads would fail until it is
/// recreated.
pub async fn health_check(State(state): State<SharedState>) -> Result<Json<HealthResponse>, AppError> {
    let metadata = tokio::fs::metadata(&state.upload_dir).await?;
    if !metadata.is_dir() {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            format!("{} is not a directory", state.upload_dir.display()),
        )));
    }

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        upload_dir: "ready".to_string(),
        timestamp: Utc::now(),
    }))
}
