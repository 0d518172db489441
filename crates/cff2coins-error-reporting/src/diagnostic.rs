//! Core diagnostic message types.
//!
//! This module defines the structures for representing error messages
//! following tidyverse-style guidelines.

/// How detail items should be presented (tidyverse x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    /// Error detail (✖ bullet in tidyverse style)
    Error,
    /// Info detail (i bullet in tidyverse style)
    Info,
}

impl DetailKind {
    fn bullet(self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
        }
    }
}

/// Markdown text of a message or detail item. Backticks mark field names
/// and values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent(s.to_string())
    }
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailItem {
    pub kind: DetailKind,
    pub content: MessageContent,
}

/// An error message following tidyverse-style structure.
///
/// Structure:
/// 1. **Code**: Optional error code (e.g., "C-1-1") for searchability
/// 2. **Title**: Brief error message
/// 3. **Problem**: What went wrong (the "must" or "can't" statement)
/// 4. **Details**: Specific information (bulleted)
/// 5. **Hints**: Optional guidance for fixing (ends with ?)
///
/// Build one with [`DiagnosticMessageBuilder`](crate::DiagnosticMessageBuilder).
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticMessage {
    /// Optional error code (e.g., "C-1-1")
    pub code: Option<String>,

    /// Brief title for the error
    pub title: String,

    /// The problem statement (the "what" - using "must" or "can't")
    pub problem: Option<MessageContent>,

    /// Specific error details (the "where/why")
    pub details: Vec<DetailItem>,

    /// Optional hints for fixing (ends with ?)
    pub hints: Vec<MessageContent>,
}

impl DiagnosticMessage {
    /// Get the documentation URL for this error, if it has a catalogued code.
    pub fn docs_url(&self) -> Option<&str> {
        self.code
            .as_ref()
            .and_then(|code| crate::catalog::get_docs_url(code))
    }

    /// Render this diagnostic message as text following tidyverse style.
    ///
    /// Format:
    /// ```text
    /// Error [C-1-1]: title
    /// Problem statement here
    /// ✖ Error detail 1
    /// ℹ Info detail
    /// ? Hint 1
    /// ```
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();

        match &self.code {
            Some(code) => lines.push(format!("Error [{}]: {}", code, self.title)),
            None => lines.push(format!("Error: {}", self.title)),
        }

        if let Some(problem) = &self.problem {
            lines.push(problem.as_str().to_string());
        }

        for detail in &self.details {
            lines.push(format!("{} {}", detail.kind.bullet(), detail.content.as_str()));
        }

        for hint in &self.hints {
            lines.push(format!("? {}", hint.as_str()));
        }

        lines.join("\n")
    }
}
