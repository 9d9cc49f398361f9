//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (multipart body, shared state)
//! 2. Delegates to the statement service
//! 3. Returns an HTTP response (HTML, CSV, or JSON)

/// Service health endpoint
pub mod health;
/// Upload form, CSV download and extraction API
pub mod statements;
