//! Statement service - the upload-to-table pipeline.
//!
//! This service handles:
//! - Reading the `file` field of a multipart upload
//! - Storing the upload in the upload directory
//! - Text extraction, field extraction and positional zipping
//! - Writing the shared `result.csv` export

use axum::{body::Bytes, extract::Multipart};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::statement::{StatementKind, StatementRow, TextSource, sanitize_filename},
    services::{csv_export, statement_parser, text_extraction},
    state::{AppState, prepare_upload_dir},
};

/// Multipart form field carrying the statement.
pub const FILE_FIELD: &str = "file";

/// A validated statement upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub kind: StatementKind,
    pub bytes: Bytes,
}

/// Outcome of processing one upload.
#[derive(Debug, Clone)]
pub struct ProcessedStatement {
    pub file_name: String,
    pub kind: StatementKind,
    pub text_source: TextSource,
    pub rows: Vec<StatementRow>,
}

/// Pull the statement out of a multipart body.
///
/// Fields other than `file`, and a `file` part sent without a filename,
/// are ignored.
///
/// # Errors
///
/// - `NoFileUploaded`: the body has no `file` part carrying a filename
/// - `UnsupportedFileType`: the file name is not `*.pdf` / `*.docx`
/// - `Multipart`: the body is malformed or exceeds the size limit
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A part without a filename is a plain form value, not a file.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let kind = StatementKind::from_filename(&file_name).ok_or(AppError::UnsupportedFileType)?;
        let bytes = field.bytes().await?;

        return Ok(Upload {
            file_name,
            kind,
            bytes,
        });
    }

    Err(AppError::NoFileUploaded)
}

/// Run an upload through the whole pipeline.
///
/// # Process
///
/// 1. Store the upload under a unique name in the upload directory
/// 2. Extract the statement text (text layer, OCR fallback, or DOCX)
/// 3. Match fields and zip them into rows
/// 4. Replace `result.csv` with the new rows
///
/// # Errors
///
/// - `UnreadableDocument`: the DOCX cannot be opened
/// - `Io` / `Csv`: the upload directory cannot be written
pub async fn process_upload(
    state: &AppState,
    upload: Upload,
) -> Result<ProcessedStatement, AppError> {
    prepare_upload_dir(&state.upload_dir).await?;

    let stored_name = format!(
        "{}-{}",
        Uuid::new_v4(),
        sanitize_filename(&upload.file_name, upload.kind)
    );
    let stored_path = state.upload_dir.join(&stored_name);
    tokio::fs::write(&stored_path, &upload.bytes).await?;

    tracing::info!(
        file_name = %upload.file_name,
        kind = upload.kind.extension(),
        bytes = upload.bytes.len(),
        stored = %stored_path.display(),
        "statement uploaded"
    );

    let extracted = text_extraction::extract_statement_text(upload.kind, upload.bytes, &state.ocr)
        .await
        .map_err(|e| {
            tracing::warn!(file_name = %upload.file_name, error = %e, "statement unreadable");
            AppError::UnreadableDocument(e)
        })?;

    let rows = statement_parser::extract_rows(&extracted.text);
    csv_export::write_result_csv(&state.upload_dir, &rows).await?;

    tracing::info!(
        file_name = %upload.file_name,
        text_source = extracted.source.as_str(),
        text_chars = extracted.text.chars().count(),
        rows = rows.len(),
        "statement processed"
    );

    Ok(ProcessedStatement {
        file_name: upload.file_name,
        kind: upload.kind,
        text_source: extracted.source,
        rows,
    })
}
