//! OCR fallback for scanned PDFs.
//!
//! Pages are rasterised with Poppler's `pdftoppm` and each page image is
//! recognised with the `tesseract` CLI. Both run as child processes inside a
//! temporary directory that is removed when extraction finishes.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::{config::Config, error::ExtractError};

/// Rasterise-then-recognise OCR pipeline.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    pdftoppm_bin: String,
    tesseract_bin: String,
    dpi: u32,
    language: String,
}

impl OcrEngine {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pdftoppm_bin: config.pdftoppm_bin.clone(),
            tesseract_bin: config.tesseract_bin.clone(),
            dpi: config.ocr_dpi,
            language: config.ocr_language.clone(),
        }
    }

    /// Recognise the text of every page of `pdf`, in page order.
    ///
    /// Each page's text is followed by a newline and the whole result is
    /// trimmed.
    ///
    /// # Errors
    ///
    /// - `ExtractError::Ocr`: a tool is missing or exits unsuccessfully
    /// - `ExtractError::Io`: the temporary workspace cannot be written
    pub async fn extract_text(&self, pdf: &[u8]) -> Result<String, ExtractError> {
        let workdir = tempfile::TempDir::new()?;
        let input = workdir.path().join("statement.pdf");
        tokio::fs::write(&input, pdf).await?;

        let prefix = workdir.path().join("page");
        let dpi = self.dpi.to_string();
        run_tool(
            &self.pdftoppm_bin,
            [
                OsStr::new("-r"),
                OsStr::new(&dpi),
                OsStr::new("-png"),
                input.as_os_str(),
                prefix.as_os_str(),
            ],
        )
        .await?;

        let pages = rendered_pages(workdir.path()).await?;
        tracing::debug!(pages = pages.len(), dpi = self.dpi, "pdf rasterised for OCR");

        let mut text = String::new();
        for page in &pages {
            let stdout = run_tool(
                &self.tesseract_bin,
                [
                    page.as_os_str(),
                    OsStr::new("stdout"),
                    OsStr::new("-l"),
                    OsStr::new(&self.language),
                ],
            )
            .await?;
            text.push_str(&String::from_utf8_lossy(&stdout));
            text.push('\n');
        }

        Ok(text.trim().to_string())
    }
}

async fn run_tool<I, S>(program: &str, args: I) -> Result<Vec<u8>, ExtractError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| ExtractError::Ocr(format!("failed to run {program}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractError::Ocr(format!(
            "{program} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(output.stdout)
}

/// PNG pages written by `pdftoppm`, sorted by page number.
///
/// `pdftoppm` zero-pads the page suffix according to the page count
/// (`page-1.png`, `page-01.png`, ...), so sorting is numeric.
async fn rendered_pages(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut pages = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if let Some(number) = page_number(&path) {
            pages.push((number, path));
        }
    }
    pages.sort_by_key(|(number, _)| *number);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

fn page_number(path: &Path) -> Option<u32> {
    if path.extension()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (_, number) = stem.rsplit_once('-')?;
    number.parse().ok()
}
