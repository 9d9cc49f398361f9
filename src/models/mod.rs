//! Data models for uploads, extracted rows and API responses.

/// Statement upload and row model
pub mod statement;
