//! Error types for CFF to COinS conversion.

use cff2coins_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use std::fmt;
use std::path::PathBuf;

use crate::role::SpanRole;

/// Result type alias for cff2coins operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting citations.
///
/// Every error aborts the conversion it was raised in.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Required top-level CFF fields are absent.
    MissingRequiredFields { fields: Vec<String> },

    /// The declared `cff-version` is not supported.
    UnsupportedCffVersion {
        found: Option<String>,
        supported: Vec<String>,
    },

    /// A nested record lacks a field needed to build its span.
    MissingField { field: String, role: SpanRole },

    /// The referrer id override is not of the form `<authority>:<id>`.
    InvalidReferrerId { value: String },

    /// The record `type` is not allowed for its role.
    InvalidType {
        found: Option<String>,
        role: SpanRole,
    },

    /// A span is empty.
    InvalidSpanStructure,

    /// A primary span describes neither a computer program nor a dataset.
    NotSoftwareOrDataset,

    /// The operation is deliberately not implemented.
    Unimplemented { operation: String },

    /// The citation text is not valid YAML, or has the wrong shape.
    Yaml { message: String },

    /// Reading or writing a file failed.
    Io { path: PathBuf, message: String },

    /// A persisted result tree could not be encoded or decoded.
    Json { message: String },

    /// Error from the markup collaborator.
    Markup(coins_parser::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingRequiredFields { fields } => write!(
                f,
                "Invalid CFF: missing the following required fields: {}",
                fields.join(", ")
            ),
            Error::UnsupportedCffVersion { found, supported } => write!(
                f,
                "Invalid CFF: cff-version '{}' is not supported; use one of: {}",
                found.as_deref().unwrap_or_default(),
                supported.join(", ")
            ),
            Error::MissingField { field, role } => {
                write!(f, "Invalid CFF: {} is missing required field '{}'", role, field)
            }
            Error::InvalidReferrerId { value } => write!(
                f,
                "Invalid referrer id '{}': it must have the form '<authority>:<id>'",
                value
            ),
            Error::InvalidType { found, role } => match (found, role) {
                (Some(found), SpanRole::Primary) => write!(
                    f,
                    "Invalid CFF: 'type' must be 'software' or 'dataset', found '{}'",
                    found
                ),
                (Some(found), role) => {
                    write!(f, "Invalid CFF: unknown 'type' '{}' for {}", found, role)
                }
                (None, role) => write!(f, "Invalid CFF: {} must declare a 'type'", role),
            },
            Error::InvalidSpanStructure => write!(
                f,
                "Invalid CoinSpan for CFF: coin span must have at least one term"
            ),
            Error::NotSoftwareOrDataset => write!(
                f,
                "Invalid COinS for CFF: must contain metadata for either a computer program or a dataset"
            ),
            Error::Unimplemented { operation } => {
                write!(f, "{} is not implemented", operation)
            }
            Error::Yaml { message } => write!(f, "Invalid CFF YAML: {}", message),
            Error::Io { path, message } => {
                write!(f, "Failed to access '{}': {}", path.display(), message)
            }
            Error::Json { message } => write!(f, "Invalid COinS JSON: {}", message),
            Error::Markup(e) => write!(f, "Markup error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Markup(e) => Some(e),
            _ => None,
        }
    }
}

impl From<coins_parser::Error> for Error {
    fn from(err: coins_parser::Error) -> Self {
        Error::Markup(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
        }
    }
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, err: impl fmt::Display) -> Self {
        Error::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn yaml(message: impl Into<String>) -> Self {
        Error::Yaml {
            message: message.into(),
        }
    }

    pub(crate) fn json(message: impl Into<String>) -> Self {
        Error::Json {
            message: message.into(),
        }
    }

    /// Convert this error to a DiagnosticMessage with the appropriate error code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        match self {
            Error::MissingRequiredFields { fields } => {
                let mut builder = DiagnosticMessageBuilder::error("Missing Required CFF Fields")
                    .with_code("C-1-1")
                    .problem("A citation file must declare `cff-version`, `message`, `title` and `authors`");
                for field in fields {
                    builder = builder.add_detail(format!("`{}` is missing", field));
                }
                builder
                    .add_hint("Add the missing fields to CITATION.cff?")
                    .build()
            }

            Error::UnsupportedCffVersion { found, supported } => {
                let builder = DiagnosticMessageBuilder::error("Unsupported CFF Version")
                    .with_code("C-1-2")
                    .problem(format!(
                        "`cff-version` must be one of: {}",
                        supported.join(", ")
                    ));
                let builder = match found {
                    Some(found) => builder.add_detail(format!("Found `{}`", found)),
                    None => builder.add_detail("`cff-version` has no value"),
                };
                builder.build()
            }

            Error::MissingField { field, role } => {
                DiagnosticMessageBuilder::error("Missing Citation Field")
                    .with_code("C-1-3")
                    .problem(format!("Each {} needs a `{}`", role, field))
                    .add_hint(format!("Add `{}:` to the {}?", field, role))
                    .build()
            }

            Error::InvalidReferrerId { value } => {
                DiagnosticMessageBuilder::error("Invalid Referrer Id")
                    .with_code("C-2-1")
                    .problem("The referrer id must have the form `<authority>:<id>`")
                    .add_detail(format!("Found `{}`", value))
                    .add_hint("Use exactly one colon, as in `github.owner:project`?")
                    .build()
            }

            Error::InvalidType { found, role } => {
                let builder = DiagnosticMessageBuilder::error("Invalid Citation Type")
                    .with_code("C-3-1");
                let builder = if role.is_primary() {
                    builder.problem("The primary citation's `type` must be `software` or `dataset`")
                } else {
                    builder.problem(format!(
                        "The {}'s `type` must be a CFF reference type",
                        role
                    ))
                };
                let builder = match found {
                    Some(found) => builder.add_detail(format!("Found `{}`", found)),
                    None => builder.add_detail("`type` is missing"),
                };
                builder.build()
            }

            Error::InvalidSpanStructure => DiagnosticMessageBuilder::error("Invalid COinS Span")
                .with_code("C-4-1")
                .problem("A COinS span must contain at least one term")
                .build(),

            Error::NotSoftwareOrDataset => {
                DiagnosticMessageBuilder::error("Not Software Or Dataset")
                    .with_code("C-5-1")
                    .problem("The COinS span must describe a computer program or a dataset")
                    .add_info("Expected `rft_val_fmt` of `info:ofi/fmt:kev:mtx:computerProgram` or `info:ofi/fmt:kev:mtx:data`")
                    .build()
            }

            Error::Unimplemented { operation } => {
                DiagnosticMessageBuilder::error("Not Implemented")
                    .with_code("C-6-1")
                    .problem(format!("`{}` is not implemented", operation))
                    .build()
            }

            Error::Yaml { message } => DiagnosticMessageBuilder::error("Invalid CFF YAML")
                .with_code("C-7-1")
                .problem("The citation file could not be read as a CFF document")
                .add_detail(message.clone())
                .build(),

            Error::Io { path, message } => DiagnosticMessageBuilder::error("File Read Error")
                .with_code("C-7-2")
                .problem(format!("Could not access `{}`", path.display()))
                .add_detail(message.clone())
                .build(),

            Error::Markup(e) => DiagnosticMessageBuilder::error("COinS Markup Error")
                .with_code("C-8-1")
                .problem(e.to_string())
                .build(),

            Error::Json { message } => {
                DiagnosticMessageBuilder::error("Invalid COinS JSON Tree")
                    .with_code("C-9-1")
                    .problem("The JSON document is not a valid COinS result tree")
                    .add_detail(message.clone())
                    .build()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_diagnostic_lists_each_field() {
        let err = Error::MissingRequiredFields {
            fields: vec!["title".to_string(), "authors".to_string()],
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.code.as_deref(), Some("C-1-1"));
        assert_eq!(diag.details.len(), 2);
        assert_eq!(diag.details[1].content.as_str(), "`authors` is missing");
    }

    #[test]
    fn test_every_code_is_catalogued() {
        let errors = vec![
            Error::MissingRequiredFields { fields: vec![] },
            Error::UnsupportedCffVersion {
                found: None,
                supported: vec![],
            },
            Error::MissingField {
                field: "title".to_string(),
                role: SpanRole::Reference,
            },
            Error::InvalidReferrerId {
                value: "x".to_string(),
            },
            Error::InvalidType {
                found: None,
                role: SpanRole::Reference,
            },
            Error::InvalidSpanStructure,
            Error::NotSoftwareOrDataset,
            Error::Unimplemented {
                operation: "to_cff_string".to_string(),
            },
            Error::yaml("bad"),
            Error::io("CITATION.cff", "not found"),
            Error::json("bad"),
            Error::Markup(coins_parser::Error::Serialization("bad".to_string())),
        ];

        for err in errors {
            let diag = err.to_diagnostic();
            let code = diag.code.clone().unwrap_or_default();
            assert!(
                cff2coins_error_reporting::get_error_info(&code).is_some(),
                "{} has uncatalogued code '{}'",
                err,
                code
            );
        }
    }

    #[test]
    fn test_invalid_type_display_depends_on_role() {
        let primary = Error::InvalidType {
            found: Some("article".to_string()),
            role: SpanRole::Primary,
        };
        assert_eq!(
            primary.to_string(),
            "Invalid CFF: 'type' must be 'software' or 'dataset', found 'article'"
        );

        let reference = Error::InvalidType {
            found: Some("poem".to_string()),
            role: SpanRole::Reference,
        };
        assert_eq!(
            reference.to_string(),
            "Invalid CFF: unknown 'type' 'poem' for reference"
        );
    }
}
