//! Statement text extraction.
//!
//! - PDF: embedded text layer, falling back to OCR when it yields nothing
//! - DOCX: paragraph text, see [`crate::services::docx`]
//!
//! PDF and OCR failures never fail the upload: they are logged and the
//! statement is treated as having no text.

use axum::body::Bytes;

use crate::{
    error::ExtractError,
    models::statement::{StatementKind, TextSource},
    services::{docx, ocr::OcrEngine},
};

/// Text pulled from a statement and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub source: TextSource,
}

/// Read the embedded text layer of a PDF, page by page.
///
/// Every non-blank page contributes its text followed by a newline; the
/// result is trimmed. Parsing runs on the blocking pool, and a parser panic
/// is reported as an error.
pub async fn extract_pdf_text(pdf: Bytes) -> Result<String, ExtractError> {
    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&pdf)
            .map_err(|e| ExtractError::Pdf(format!("{e:?}")))
    })
    .await
    .map_err(|e| ExtractError::Pdf(format!("PDF parser aborted: {e}")))??;

    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages.iter().filter(|page| !page.trim().is_empty()) {
        text.push_str(page);
        text.push('\n');
    }
    text.trim().to_string()
}

/// Extract the text of an uploaded statement.
///
/// # Errors
///
/// Only DOCX failures are returned; see the module docs.
pub async fn extract_statement_text(
    kind: StatementKind,
    bytes: Bytes,
    ocr: &OcrEngine,
) -> Result<ExtractedText, ExtractError> {
    match kind {
        StatementKind::Docx => Ok(ExtractedText {
            text: docx::extract_docx_text(&bytes)?,
            source: TextSource::Docx,
        }),
        StatementKind::Pdf => Ok(extract_pdf_with_fallback(bytes, ocr).await),
    }
}

async fn extract_pdf_with_fallback(bytes: Bytes, ocr: &OcrEngine) -> ExtractedText {
    match extract_pdf_text(bytes.clone()).await {
        Ok(text) if !text.is_empty() => {
            return ExtractedText {
                text,
                source: TextSource::TextLayer,
            };
        }
        Ok(_) => tracing::info!("PDF has no text layer, falling back to OCR"),
        Err(e) => tracing::warn!(error = %e, "PDF text layer unreadable, falling back to OCR"),
    }

    match ocr.extract_text(&bytes).await {
        Ok(text) if !text.is_empty() => ExtractedText {
            text,
            source: TextSource::Ocr,
        },
        Ok(_) => ExtractedText {
            text: String::new(),
            source: TextSource::None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "OCR failed, continuing with empty text");
            ExtractedText {
                text: String::new(),
                source: TextSource::None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::docx::tests::docx_with_paragraphs;

    fn unavailable_ocr() -> OcrEngine {
        let mut config: crate::config::Config =
            envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        config.pdftoppm_bin = "statement-extractor-missing-pdftoppm".to_string();
        OcrEngine::from_config(&config)
    }

    #[test]
    fn blank_pages_are_skipped() {
        let pages = vec![
            "  page one  ".to_string(),
            "   \n ".to_string(),
            "page three".to_string(),
        ];
        assert_eq!(join_pages(&pages), "page one  \npage three");
    }

    #[test]
    fn no_pages_is_empty_text() {
        assert_eq!(join_pages(&[]), "");
    }

    #[tokio::test]
    async fn docx_statements_use_paragraph_text() {
        let docx = docx_with_paragraphs(&["SBI Titanium", "4321 01/02/2024 99.00"]);
        let extracted =
            extract_statement_text(StatementKind::Docx, Bytes::from(docx), &unavailable_ocr())
                .await
                .unwrap();
        assert_eq!(extracted.source, TextSource::Docx);
        assert_eq!(extracted.text, "SBI Titanium 4321 01/02/2024 99.00");
    }

    #[tokio::test]
    async fn unreadable_docx_is_an_error() {
        let result = extract_statement_text(
            StatementKind::Docx,
            Bytes::from_static(b"not a zip"),
            &unavailable_ocr(),
        )
        .await;
        assert!(matches!(result, Err(ExtractError::Docx(_))));
    }

    #[tokio::test]
    async fn unreadable_pdf_degrades_to_empty_text() {
        let extracted = extract_statement_text(
            StatementKind::Pdf,
            Bytes::from_static(b"this is not a pdf"),
            &unavailable_ocr(),
        )
        .await
        .unwrap();
        assert_eq!(
            extracted,
            ExtractedText {
                text: String::new(),
                source: TextSource::None,
            }
        );
    }
}
