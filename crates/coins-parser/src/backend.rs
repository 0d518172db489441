//! Parser backend selection.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How markup is searched for COinS spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkupBackend {
    /// Build a full HTML5 tree with html5ever and walk it.
    #[default]
    Html5ever,
    /// Run the html5ever tokenizer over start tags without building a tree.
    Scan,
}

impl MarkupBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkupBackend::Html5ever => "html5ever",
            MarkupBackend::Scan => "scan",
        }
    }
}

impl fmt::Display for MarkupBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkupBackend {
    type Err = Error;

    /// `html.parser` is accepted as an alias for the default tree builder.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html5ever" | "html.parser" | "html" => Ok(MarkupBackend::Html5ever),
            "scan" => Ok(MarkupBackend::Scan),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}
