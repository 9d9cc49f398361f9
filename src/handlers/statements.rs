//! Statement HTTP handlers.
//!
//! This module implements the upload form and its API twin:
//! - GET / - Upload form
//! - POST / - Upload a statement, render the extracted table
//! - GET /download - Download the last export as CSV
//! - POST /api/v1/statements/extract - Upload a statement, receive JSON rows

use axum::{
    Json,
    extract::{Multipart, State},
    http::header,
    response::{Html, IntoResponse},
};

use crate::{
    error::{ApiError, AppError},
    models::statement::ExtractionResponse,
    services::{csv_export, statement_service},
    state::SharedState,
    views,
};

/// Render the upload form.
pub async fn index() -> Html<String> {
    Html(views::index_page())
}

/// Upload a statement and render the extracted rows.
///
/// # Request Body
///
/// `multipart/form-data` with a `file` field holding a `.pdf` or `.docx`.
///
/// # Response
///
/// - **Success (200 OK)**: HTML table of rows with a link to `/download`
/// - **Error (400)**: No file field, or a file that is not PDF / DOCX
/// - **Error (422)**: DOCX that cannot be read
pub async fn upload(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let upload = statement_service::read_upload(multipart).await?;
    let processed = statement_service::process_upload(&state, upload).await?;

    Ok(Html(views::result_page(
        &processed.file_name,
        &processed.rows,
    )))
}

/// Download `result.csv` as an attachment.
///
/// Returns 404 until a statement has been processed.
pub async fn download(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let path = csv_export::result_path(&state.upload_dir);
    let csv = match tokio::fs::read(&path).await {
        Ok(csv) => csv,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::ResultNotFound);
        }
        Err(e) => return Err(e.into()),
    };

    let disposition = format!("attachment; filename=\"{}\"", csv_export::RESULT_FILE);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Upload a statement and receive the extracted rows as JSON.
///
/// # Response (200)
///
/// ```json
/// {
///   "file_name": "march.pdf",
///   "kind": "pdf",
///   "text_source": "text_layer",
///   "row_count": 1,
///   "rows": [
///     {
///       "Credit Card - Last 4 Digits": "4321",
///       "Transaction Date": "12/03/2024",
///       "Card Variant": "Platinum",
///       "Transaction Amount": "1,250.00",
///       "Bank Name": "HDFC"
///     }
///   ]
/// }
/// ```
///
/// The rows also replace `result.csv`, as with the form upload.
pub async fn extract(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<ExtractionResponse>, ApiError> {
    let upload = statement_service::read_upload(multipart).await?;
    let processed = statement_service::process_upload(&state, upload).await?;

    Ok(Json(ExtractionResponse {
        file_name: processed.file_name,
        kind: processed.kind,
        text_source: processed.text_source,
        row_count: processed.rows.len(),
        rows: processed.rows,
    }))
}
