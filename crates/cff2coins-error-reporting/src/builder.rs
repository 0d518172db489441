//! Builder API for diagnostic messages.
//!
//! The builder encodes tidyverse-style error message guidelines in the API:
//! a title, a problem statement, bulleted details and hints.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticMessage, MessageContent};

/// Builder for creating diagnostic messages following tidyverse guidelines.
///
/// # Example
///
/// ```
/// use cff2coins_error_reporting::DiagnosticMessageBuilder;
///
/// let error = DiagnosticMessageBuilder::error("Unsupported CFF Version")
///     .with_code("C-1-2")
///     .problem("`cff-version` must be one of: 1.2.0")
///     .add_detail("Found `1.1.0`")
///     .add_hint("Upgrade the citation file to CFF 1.2.0?")
///     .build();
///
/// assert_eq!(error.code, Some("C-1-2".to_string()));
/// assert_eq!(error.details.len(), 1);
/// assert_eq!(error.hints.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    title: String,
    code: Option<String>,
    problem: Option<MessageContent>,
    details: Vec<DetailItem>,
    hints: Vec<MessageContent>,
}

impl DiagnosticMessageBuilder {
    /// Create an error diagnostic builder.
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: None,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the problem statement ("must" or "can't").
    pub fn problem(mut self, stmt: impl Into<MessageContent>) -> Self {
        self.problem = Some(stmt.into());
        self
    }

    /// Add an error detail (displayed with error/cross bullet).
    pub fn add_detail(mut self, detail: impl Into<MessageContent>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Error,
            content: detail.into(),
        });
        self
    }

    /// Add an info detail (displayed with info bullet).
    pub fn add_info(mut self, info: impl Into<MessageContent>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Info,
            content: info.into(),
        });
        self
    }

    /// Add a hint for fixing the error.
    pub fn add_hint(mut self, hint: impl Into<MessageContent>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Build the diagnostic message.
    pub fn build(self) -> DiagnosticMessage {
        DiagnosticMessage {
            code: self.code,
            title: self.title,
            problem: self.problem,
            details: self.details,
            hints: self.hints,
        }
    }
}
