//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses. The upload form routes answer with plain text, the
//! JSON API answers with a JSON error envelope.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failure while pulling text out of an uploaded statement.
///
/// PDF and OCR failures are recovered from (the statement is treated as
/// having no text). DOCX failures surface to the client.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The PDF text layer could not be parsed.
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    /// The DOCX container or its `word/document.xml` part is unreadable.
    #[error("DOCX text extraction failed: {0}")]
    Docx(String),

    /// Rasterising or recognising a scanned PDF failed.
    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("I/O error during extraction: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Upload Errors**: Missing file field, disallowed file name, malformed body
/// - **Document Errors**: A DOCX that cannot be opened
/// - **Resource Errors**: No exported CSV exists yet
/// - **Internal Errors**: Filesystem and CSV serialization failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The multipart body has no `file` field.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("No file uploaded.")]
    NoFileUploaded,

    /// The uploaded file name does not end in `.pdf` or `.docx`.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Only PDF and DOCX files are allowed.")]
    UnsupportedFileType,

    /// The request body is not valid `multipart/form-data`.
    ///
    /// Returns HTTP 400 Bad Request (or 413 when the body limit is exceeded).
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    /// The uploaded document could not be read.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("Could not read the uploaded document")]
    UnreadableDocument(#[source] ExtractError),

    /// `/download` was requested before any statement was processed.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("No exported result available. Upload a statement first.")]
    ResultNotFound,

    /// Filesystem operation on the upload directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the CSV export failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// Map each error variant to (HTTP status, error code, client-facing message).
    ///
    /// Internal failures hide their details from the client and are logged here.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NoFileUploaded => {
                (StatusCode::BAD_REQUEST, "no_file_uploaded", self.to_string())
            }
            AppError::UnsupportedFileType => (
                StatusCode::BAD_REQUEST,
                "unsupported_file_type",
                self.to_string(),
            ),
            AppError::Multipart(err) => (err.status(), "invalid_upload", err.body_text()),
            AppError::UnreadableDocument(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unreadable_document",
                self.to_string(),
            ),
            AppError::ResultNotFound => {
                (StatusCode::NOT_FOUND, "result_not_found", self.to_string())
            }
            AppError::Io(_) | AppError::Csv(_) => {
                tracing::error!(error = %self, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        }
    }
}

/// Convert AppError into a plain-text HTTP response.
///
/// Used by the HTML form routes, which mirror a browser form submission.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _, message) = self.parts();
        (status, message).into_response()
    }
}

/// JSON flavour of [`AppError`] for the `/api/v1` routes.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.0.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_errors_are_bad_requests() {
        assert_eq!(
            AppError::NoFileUploaded.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnsupportedFileType.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unreadable_document_is_unprocessable() {
        let err = AppError::UnreadableDocument(ExtractError::Docx("bad zip".into()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::Io(std::io::Error::other("disk on fire"));
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "internal_error");
        assert!(!message.contains("disk on fire"));
    }

    #[test]
    fn api_error_wraps_app_error() {
        let err: ApiError = AppError::ResultNotFound.into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
