//! DOCX paragraph text extraction.
//!
//! A DOCX file is a zip container; the body lives in `word/document.xml`.
//! Paragraph text is the concatenation of its `<w:t>` runs, with `<w:tab/>`
//! and `<w:br/>` / `<w:cr/>` mapped to `\t` and `\n`. Paragraphs nested in
//! text boxes or table cells are read as paragraphs of their own, in the
//! order they open.

use std::io::{Cursor, Read};

use quick_xml::{Reader, events::Event};

use crate::error::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the text of every paragraph, joined with a single space.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Docx(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    let paragraphs = read_paragraphs(&xml)
        .map_err(|e| ExtractError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    tracing::debug!(paragraphs = paragraphs.len(), "docx paragraphs read");

    Ok(paragraphs.join(" ").trim().to_string())
}

/// Walk the document XML and collect paragraph texts.
///
/// Each `<w:p>` gets its slot when it opens, so an inner (text box)
/// paragraph never splits the text of the paragraph around it.
fn read_paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs: Vec<String> = Vec::new();
    // Indices into `paragraphs` of the currently open paragraphs.
    let mut open: Vec<usize> = Vec::new();
    // Run depth; tab stops in <w:pPr> sit outside any run.
    let mut runs = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                }
                b"w:r" => runs += 1,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    open.pop();
                }
                b"w:r" => runs = runs.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => {
                let control = match e.name().as_ref() {
                    b"w:p" => {
                        paragraphs.push(String::new());
                        None
                    }
                    b"w:tab" if runs > 0 => Some('\t'),
                    b"w:br" | b"w:cr" if runs > 0 => Some('\n'),
                    _ => None,
                };
                if let (Some(c), Some(&current)) = (control, open.last()) {
                    paragraphs[current].push(c);
                }
            }
            Event::Text(t) if in_text => {
                if let Some(&current) = open.last() {
                    paragraphs[current].push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Build a minimal DOCX whose body holds the given raw paragraph XML.
    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            zip.start_file(DOCUMENT_PART, SimpleFileOptions::default())
                .unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf
    }

    /// Build a DOCX with one plain paragraph per line.
    pub(crate) fn docx_with_paragraphs(lines: &[&str]) -> Vec<u8> {
        let body: String = lines
            .iter()
            .map(|line| format!("<w:p><w:r><w:t>{line}</w:t></w:r></w:p>"))
            .collect();
        docx_with_body(&body)
    }

    #[test]
    fn paragraphs_are_joined_with_spaces() {
        let docx = docx_with_paragraphs(&["HDFC Bank", "Card 4321", "12/03/2024 1,250.00"]);
        assert_eq!(
            extract_docx_text(&docx).unwrap(),
            "HDFC Bank Card 4321 12/03/2024 1,250.00"
        );
    }

    #[test]
    fn runs_are_concatenated_within_a_paragraph() {
        let docx = docx_with_body(
            r#"<w:p w:rsidR="00AB"><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t xml:space="preserve">Visa </w:t></w:r><w:r><w:t>Gold</w:t></w:r><w:r><w:tab/><w:t>4321</w:t><w:br/><w:t>end</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "Visa Gold\t4321\nend");
    }

    #[test]
    fn empty_paragraphs_keep_their_slot() {
        let docx = docx_with_body(
            "<w:p><w:r><w:t>first</w:t></w:r></w:p><w:p/><w:p w:rsidR=\"01\"/><w:p><w:r><w:t>last</w:t></w:r></w:p>",
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "first   last");
    }

    #[test]
    fn table_cell_paragraphs_are_read() {
        let docx = docx_with_body(
            "<w:tbl><w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/></w:tblPr>\
             <w:tr><w:tc><w:p><w:r><w:t>4321</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p><w:r><w:t>12/03/2024</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p><w:r><w:t>1,250.00</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             <w:p><w:r><w:t>Axis Bank</w:t></w:r></w:p>",
        );
        assert_eq!(
            extract_docx_text(&docx).unwrap(),
            "4321 12/03/2024 1,250.00 Axis Bank"
        );
    }

    #[test]
    fn text_box_does_not_cut_the_surrounding_paragraph() {
        let docx = docx_with_body(
            "<w:p><w:r><w:t xml:space=\"preserve\">HDFC 4321 </w:t></w:r>\
             <w:r><w:drawing><wps:txbx><w:txbxContent>\
             <w:p><w:r><w:t>LOGO</w:t></w:r></w:p>\
             </w:txbxContent></wps:txbx></w:drawing></w:r>\
             <w:r><w:t>01/02/2024 99.00</w:t></w:r></w:p>",
        );

        let text = extract_docx_text(&docx).unwrap();
        assert_eq!(text, "HDFC 4321 01/02/2024 99.00 LOGO");

        let rows = crate::services::statement_parser::extract_rows(&text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].card_last4, "4321");
        assert_eq!(rows[0].transaction_date, "01/02/2024");
        assert_eq!(rows[0].bank_name, "HDFC");
    }

    #[test]
    fn malformed_document_xml_is_an_error() {
        let docx = docx_with_body("<w:p><w:r><w:t>4321</w:t></w:p>");
        let err = extract_docx_text(&docx).unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }

    #[test]
    fn entities_are_decoded() {
        let docx = docx_with_paragraphs(&["Tom &amp; Jerry &lt;3 &#8377;500 &#x41;"]);
        assert_eq!(extract_docx_text(&docx).unwrap(), "Tom & Jerry <3 \u{20b9}500 A");
    }

    #[test]
    fn not_a_zip_is_an_error() {
        let err = extract_docx_text(b"%PDF-1.7 not a docx").unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }

    #[test]
    fn zip_without_document_part_is_an_error() {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            zip.start_file("readme.txt", SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"hello").unwrap();
            zip.finish().unwrap();
        }
        let err = extract_docx_text(&buf).unwrap_err();
        assert!(matches!(err, ExtractError::Docx(msg) if msg.contains(DOCUMENT_PART)));
    }
}
