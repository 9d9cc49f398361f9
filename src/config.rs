//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `UPLOAD_DIR` (optional): where uploads and `result.csv` are stored, defaults to `uploads`
/// - `MAX_UPLOAD_BYTES` (optional): request body cap, defaults to 16 MiB
/// - `OCR_DPI` (optional): rasterisation resolution for scanned PDFs, defaults to 300
/// - `OCR_LANGUAGE` (optional): tesseract language pack, defaults to `eng`
/// - `PDFTOPPM_BIN` / `TESSERACT_BIN` (optional): OCR tool executables
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default = "default_ocr_dpi")]
    pub ocr_dpi: u32,

    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    #[serde(default = "default_pdftoppm_bin")]
    pub pdftoppm_bin: String,

    #[serde(default = "default_tesseract_bin")]
    pub tesseract_bin: String,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_ocr_dpi() -> u32 {
    300
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_pdftoppm_bin() -> String {
    "pdftoppm".to_string()
}

fn default_tesseract_bin() -> String {
    "tesseract".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into its expected type (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: upload_dir -> UPLOAD_DIR
        envy::from_env::<Config>()
    }
}
