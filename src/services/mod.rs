//! Business logic services.
//!
//! Services contain the extraction pipeline separated from HTTP handlers.

pub mod csv_export;
pub mod docx;
pub mod ocr;
pub mod statement_parser;
pub mod statement_service;
pub mod text_extraction;
