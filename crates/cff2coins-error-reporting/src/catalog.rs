//! Error code catalog and lookup.
//!
//! Maps error codes (like "C-1-1") to their metadata: subsystem, title,
//! default message and documentation URL.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Metadata for an error code.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// Subsystem name (e.g., "citation-schema", "markup")
    pub subsystem: String,

    /// Short title for the error
    pub title: String,

    /// Default message for the error
    pub message_template: String,

    /// URL to documentation (optional)
    pub docs_url: Option<String>,

    /// When this error was introduced (version)
    pub since_version: String,
}

/// Global error catalog, embedded at compile time from `error_catalog.json`.
///
/// # Panics
///
/// Panics on first access if the embedded JSON is invalid.
pub static ERROR_CATALOG: Lazy<HashMap<String, ErrorCodeInfo>> = Lazy::new(|| {
    let json_data = include_str!("../error_catalog.json");
    serde_json::from_str(json_data).expect("Invalid error catalog JSON - this is a bug in cff2coins")
});

/// Look up error code information.
pub fn get_error_info(code: &str) -> Option<&ErrorCodeInfo> {
    ERROR_CATALOG.get(code)
}

/// Get documentation URL for an error code.
pub fn get_docs_url(code: &str) -> Option<&str> {
    ERROR_CATALOG
        .get(code)
        .and_then(|info| info.docs_url.as_deref())
}
