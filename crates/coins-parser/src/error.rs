//! Error types for COinS markup handling.

use thiserror::Error;

/// Result type alias for coins-parser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while selecting a backend or rendering markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested parser backend name is not recognised.
    #[error("Unknown markup backend '{0}': expected one of html5ever, html.parser, scan")]
    UnknownBackend(String),

    /// The HTML serializer failed to write a span.
    #[error("HTML serialization failed: {0}")]
    Serialization(String),
}
