//! Statement data models and API response types.
//!
//! This module defines:
//! - `StatementKind`: the accepted upload formats
//! - `StatementRow`: one extracted transaction row, as rendered and exported
//! - `ExtractedFields`: the independent regex match lists a row is zipped from
//! - `ExtractionResponse`: the JSON body returned by the extraction API

use serde::Serialize;

/// Column headers, in export order.
pub const COLUMNS: [&str; 5] = [
    "Credit Card - Last 4 Digits",
    "Transaction Date",
    "Card Variant",
    "Transaction Amount",
    "Bank Name",
];

/// Placeholder for variant / bank when a row has no positional match.
pub const UNKNOWN: &str = "Unknown";

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Pdf,
    Docx,
}

impl StatementKind {
    /// Classify an upload by the extension after the last `.` (case-insensitive).
    ///
    /// Returns `None` for names without a dot or with any other extension.
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(StatementKind::Pdf),
            "docx" => Some(StatementKind::Docx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            StatementKind::Pdf => "pdf",
            StatementKind::Docx => "docx",
        }
    }
}

/// Reduce a client-supplied file name to a safe final path component.
///
/// Both `/` and `\` count as separators so a Windows-style path cannot
/// smuggle a directory into the upload folder.
pub fn sanitize_filename(name: &str, kind: StatementKind) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    match base {
        "" | "." | ".." => format!("upload.{}", kind.extension()),
        other => other.to_string(),
    }
}

/// Where the statement text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// Embedded PDF text layer
    TextLayer,
    /// Rasterised PDF run through tesseract
    Ocr,
    /// DOCX paragraphs
    Docx,
    /// Nothing could be extracted
    None,
}

impl TextSource {
    pub fn as_str(self) -> &'static str {
        match self {
            TextSource::TextLayer => "text_layer",
            TextSource::Ocr => "ocr",
            TextSource::Docx => "docx",
            TextSource::None => "none",
        }
    }
}

/// One candidate transaction.
///
/// Fields are kept verbatim as matched in the statement text.
///
/// # JSON Example
///
/// ```json
/// {
///   "Credit Card - Last 4 Digits": "4321",
///   "Transaction Date": "12/03/2024",
///   "Card Variant": "Platinum",
///   "Transaction Amount": "1,250.00",
///   "Bank Name": "HDFC"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    #[serde(rename = "Credit Card - Last 4 Digits")]
    pub card_last4: String,

    #[serde(rename = "Transaction Date")]
    pub transaction_date: String,

    #[serde(rename = "Card Variant")]
    pub card_variant: String,

    #[serde(rename = "Transaction Amount")]
    pub transaction_amount: String,

    #[serde(rename = "Bank Name")]
    pub bank_name: String,
}

impl StatementRow {
    /// Field values in [`COLUMNS`] order.
    pub fn values(&self) -> [&str; 5] {
        [
            &self.card_last4,
            &self.transaction_date,
            &self.card_variant,
            &self.transaction_amount,
            &self.bank_name,
        ]
    }
}

/// Independent match lists found in a statement's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub card_numbers: Vec<String>,
    pub dates: Vec<String>,
    pub amounts: Vec<String>,
    pub variants: Vec<String>,
    pub banks: Vec<String>,
}

impl ExtractedFields {
    /// Zip the lists positionally into rows.
    ///
    /// The row count is the length of the shortest of card numbers, dates and
    /// amounts. Variant and bank fall back to [`UNKNOWN`] past the end of
    /// their lists.
    pub fn into_rows(self) -> Vec<StatementRow> {
        let mut variants = self.variants.into_iter();
        let mut banks = self.banks.into_iter();

        self.card_numbers
            .into_iter()
            .zip(self.dates)
            .zip(self.amounts)
            .map(|((card_last4, transaction_date), transaction_amount)| StatementRow {
                card_last4,
                transaction_date,
                card_variant: variants.next().unwrap_or_else(|| UNKNOWN.to_string()),
                transaction_amount,
                bank_name: banks.next().unwrap_or_else(|| UNKNOWN.to_string()),
            })
            .collect()
    }
}

/// Response returned by `POST /api/v1/statements/extract`.
#[derive(Debug, Serialize)]
pub struct ExtractionResponse {
    pub file_name: String,
    pub kind: StatementKind,
    pub text_source: TextSource,
    pub row_count: usize,
    pub rows: Vec<StatementRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn allowed_extensions_are_case_insensitive() {
        assert_eq!(StatementKind::from_filename("jan.pdf"), Some(StatementKind::Pdf));
        assert_eq!(StatementKind::from_filename("JAN.PDF"), Some(StatementKind::Pdf));
        assert_eq!(
            StatementKind::from_filename("statement.v2.Docx"),
            Some(StatementKind::Docx)
        );
    }

    #[test]
    fn other_names_are_rejected() {
        assert_eq!(StatementKind::from_filename(""), None);
        assert_eq!(StatementKind::from_filename("pdf"), None);
        assert_eq!(StatementKind::from_filename("statement.doc"), None);
        assert_eq!(StatementKind::from_filename("statement.pdf.exe"), None);
        assert_eq!(StatementKind::from_filename("statement."), None);
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(
            sanitize_filename("../../etc/passwd.pdf", StatementKind::Pdf),
            "passwd.pdf"
        );
        assert_eq!(
            sanitize_filename(r"C:\Users\me\march.docx", StatementKind::Docx),
            "march.docx"
        );
        assert_eq!(sanitize_filename("dir/..", StatementKind::Pdf), "upload.pdf");
    }

    #[test]
    fn rows_are_truncated_to_shortest_mandatory_list() {
        let fields = ExtractedFields {
            card_numbers: strings(&["1111", "2222", "3333"]),
            dates: strings(&["01/02/2024", "03/04/2024"]),
            amounts: strings(&["100.00", "200.00", "300.00"]),
            variants: strings(&["VISA"]),
            banks: vec![],
        };

        let rows = fields.into_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].card_variant, "VISA");
        assert_eq!(rows[1].card_variant, UNKNOWN);
        assert_eq!(rows[0].bank_name, UNKNOWN);
        assert_eq!(rows[1].card_last4, "2222");
        assert_eq!(rows[1].transaction_amount, "200.00");
    }

    #[test]
    fn missing_mandatory_list_yields_no_rows() {
        let fields = ExtractedFields {
            card_numbers: strings(&["1111"]),
            dates: vec![],
            amounts: strings(&["5.00"]),
            variants: strings(&["Gold"]),
            banks: strings(&["SBI"]),
        };
        assert!(fields.into_rows().is_empty());
    }

    #[test]
    fn row_serializes_with_column_headers() {
        let row = StatementRow {
            card_last4: "4321".into(),
            transaction_date: "12/03/2024".into(),
            card_variant: "Platinum".into(),
            transaction_amount: "1,250.00".into(),
            bank_name: "HDFC".into(),
        };
        let value = serde_json::to_value(&row).unwrap();
        for column in COLUMNS {
            assert!(value.get(column).is_some(), "missing {column}");
        }
        assert_eq!(value["Transaction Amount"], "1,250.00");
    }
}
