//! CSV export of extracted rows.

use std::path::{Path, PathBuf};

use crate::{
    error::AppError,
    models::statement::{COLUMNS, StatementRow},
};

/// File name of the shared export inside the upload directory.
pub const RESULT_FILE: &str = "result.csv";

/// Serialize rows as CSV: a header line, then one record per row.
///
/// The header is written even when there are no rows.
pub fn to_csv(rows: &[StatementRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row.values())?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Path of the export for a given upload directory.
pub fn result_path(upload_dir: &Path) -> PathBuf {
    upload_dir.join(RESULT_FILE)
}

/// Write `result.csv` into `upload_dir`, replacing any previous export.
///
/// The file is written under a temporary name and renamed into place, so a
/// concurrent download sees either the old or the new export.
pub async fn write_result_csv(
    upload_dir: &Path,
    rows: &[StatementRow],
) -> Result<PathBuf, AppError> {
    let csv = to_csv(rows)?;
    let path = result_path(upload_dir);
    let staging = upload_dir.join(format!(".{RESULT_FILE}.{}", uuid::Uuid::new_v4()));

    tokio::fs::write(&staging, &csv).await?;
    if let Err(e) = tokio::fs::rename(&staging, &path).await {
        tokio::fs::remove_file(&staging).await.ok();
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "result CSV written");
    Ok(path)
}
