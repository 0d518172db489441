//! Tests for cff2coins error types.
//!
//! These tests verify that error variants have correct Display implementations
//! and produce valid DiagnosticMessage output.

use cff2coins::{Error, SpanRole};
use std::path::PathBuf;

// ============================================================================
// Display implementation tests
// ============================================================================

#[test]
fn test_missing_required_fields_display() {
    let err = Error::MissingRequiredFields {
        fields: vec!["cff-version".to_string(), "title".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Invalid CFF: missing the following required fields: cff-version, title"
    );
}

#[test]
fn test_unsupported_version_display() {
    let err = Error::UnsupportedCffVersion {
        found: Some("1.1.0".to_string()),
        supported: vec!["1.2.0".to_string()],
    };
    let display = err.to_string();
    assert!(display.contains("'1.1.0' is not supported"), "Got: {}", display);
    assert!(display.contains("1.2.0"), "Got: {}", display);
}

#[test]
fn test_invalid_referrer_id_display() {
    let err = Error::InvalidReferrerId {
        value: "a:b:c".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid referrer id 'a:b:c': it must have the form '<authority>:<id>'"
    );
}

#[test]
fn test_missing_type_display() {
    let err = Error::InvalidType {
        found: None,
        role: SpanRole::PreferredCitation,
    };
    assert_eq!(
        err.to_string(),
        "Invalid CFF: preferred citation must declare a 'type'"
    );
}

#[test]
fn test_io_display_names_path() {
    let err = Error::Io {
        path: PathBuf::from("CITATION.cff"),
        message: "No such file or directory".to_string(),
    };
    let display = err.to_string();
    assert!(display.contains("'CITATION.cff'"), "Got: {}", display);
    assert!(display.contains("No such file"), "Got: {}", display);
}

// ============================================================================
// Diagnostic conversion tests
// ============================================================================

#[test]
fn test_not_software_or_dataset_diagnostic() {
    let diag = Error::NotSoftwareOrDataset.to_diagnostic();
    assert_eq!(diag.code.as_deref(), Some("C-5-1"));
    assert_eq!(diag.title, "Not Software Or Dataset");
    assert!(diag.docs_url().is_some());
}

#[test]
fn test_invalid_type_diagnostic_text() {
    let err = Error::InvalidType {
        found: Some("article".to_string()),
        role: SpanRole::Primary,
    };
    insta::assert_snapshot!(err.to_diagnostic().to_text(), @r"
    Error [C-3-1]: Invalid Citation Type
    The primary citation's `type` must be `software` or `dataset`
    ✖ Found `article`
    ");
}

#[test]
fn test_markup_error_wraps_source() {
    let err: Error = coins_parser::Error::UnknownBackend("lxml".to_string()).into();
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("C-8-1"));
}
