//! Field extraction from statement text.
//!
//! Each field is pulled out by its own regex over the whole text, independently
//! of the others. Rows are then formed by position, see
//! [`ExtractedFields::into_rows`].

use std::sync::LazyLock;

use regex::Regex;

use crate::models::statement::{ExtractedFields, StatementRow};

static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("card number regex"));

// Either `12-Mar-2024` style or fully numeric `12/03/24`.
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}[-/.][A-Za-z]{3,}[-/.]\d{2,4}|\b\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}")
        .expect("date regex")
});

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,3}(?:,\d{3})*(?:\.\d{2})?\b").expect("amount regex")
});

static VARIANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:VISA|MasterCard|Rupay|Platinum|Signature|Gold|Titanium)\b")
        .expect("variant regex")
});

static BANK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:HDFC|ICICI|SBI|Axis|Kotak|Citi|Yes Bank|Bank of Baroda|IndusInd)\b")
        .expect("bank regex")
});

fn find_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Collect every candidate field in `text`, in order of appearance.
pub fn extract_fields(text: &str) -> ExtractedFields {
    ExtractedFields {
        card_numbers: find_all(&CARD_NUMBER, text),
        dates: find_all(&DATE, text),
        amounts: find_all(&AMOUNT, text),
        variants: find_all(&VARIANT, text),
        banks: find_all(&BANK, text),
    }
}

/// Extract fields and zip them into rows.
pub fn extract_rows(text: &str) -> Vec<StatementRow> {
    let fields = extract_fields(text);
    tracing::debug!(
        card_numbers = fields.card_numbers.len(),
        dates = fields.dates.len(),
        amounts = fields.amounts.len(),
        variants = fields.variants.len(),
        banks = fields.banks.len(),
        "statement fields matched"
    );
    fields.into_rows()
}
