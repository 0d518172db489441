//! The result tree: a primary span with its preferred citation and
//! references.

use coins_parser::{CoinSpan, CoinsParser, MarkupBackend};
use encoding_rs::Encoding;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::classifier::{self, SpanClass};
use crate::compiler;
use crate::error::{Error, Result};
use crate::options::ConversionOptions;
use crate::record::{CitationRecord, SUPPORTED_CFF_VERSIONS};
use crate::role::SpanRole;
use crate::yaml;

/// Citation file read when no path is given.
pub const DEFAULT_CFF_FILE: &str = "CITATION.cff";

/// Encoding assumed for markup files when none is given.
pub const DEFAULT_HTML_ENCODING: &str = "UTF-8";

/// A compiled citation: one span, plus the spans of the work's preferred
/// citation and references.
///
/// Serializes to the persisted JSON tree:
///
/// ```json
/// {"coin_span": [["url_ver", "Z39.88-2004"], ...], "references": [...], "preferred_citation": null}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CffCoinSpan {
    coin_span: CoinSpan,
    references: Vec<CffCoinSpan>,
    preferred_citation: Option<Box<CffCoinSpan>>,
}

impl CffCoinSpan {
    pub(crate) fn from_parts(
        coin_span: CoinSpan,
        references: Vec<CffCoinSpan>,
        preferred_citation: Option<CffCoinSpan>,
    ) -> Self {
        Self {
            coin_span,
            references,
            preferred_citation: preferred_citation.map(Box::new),
        }
    }

    pub fn coin_span(&self) -> &CoinSpan {
        &self.coin_span
    }

    pub fn references(&self) -> &[CffCoinSpan] {
        &self.references
    }

    pub fn preferred_citation(&self) -> Option<&CffCoinSpan> {
        self.preferred_citation.as_deref()
    }

    /// Build the tree from a citation record.
    ///
    /// Fails if the record lacks required top-level fields, declares an
    /// unsupported `cff-version`, or if any nested record fails to compile.
    pub fn from_cff_record(record: &CitationRecord, options: &ConversionOptions) -> Result<Self> {
        let missing = record.missing_required_fields();
        if !missing.is_empty() {
            return Err(Error::MissingRequiredFields {
                fields: missing.into_iter().map(String::from).collect(),
            });
        }
        if !record.has_supported_version() {
            return Err(Error::UnsupportedCffVersion {
                found: record.cff_version.clone(),
                supported: SUPPORTED_CFF_VERSIONS.iter().map(|v| v.to_string()).collect(),
            });
        }

        let coin_span = compiler::compile(record, SpanRole::Primary, options)?;
        let nested_options = options.for_nested();

        let preferred_citation = match record.preferred_citation.as_deref() {
            Some(preferred) => {
                let span =
                    compiler::compile(preferred, SpanRole::PreferredCitation, &nested_options)?;
                Some(Self::from_coin_span(span, SpanRole::PreferredCitation)?)
            }
            None => None,
        };

        let mut references = Vec::with_capacity(record.references.len());
        for reference in &record.references {
            let mut reference = reference.clone();
            reference.cff_version = record.cff_version.clone();
            let span = compiler::compile(&reference, SpanRole::Reference, &nested_options)?;
            references.push(Self::from_coin_span(span, SpanRole::Reference)?);
        }

        debug!(
            references = references.len(),
            has_preferred_citation = preferred_citation.is_some(),
            "built COinS result tree"
        );
        Ok(Self::from_parts(coin_span, references, preferred_citation))
    }

    /// Build the tree from CFF text.
    pub fn from_cff_string(text: &str, options: &ConversionOptions) -> Result<Self> {
        let record = yaml::parse_citation(text)?;
        Self::from_cff_record(&record, options)
    }

    /// Build the tree from a CFF file, `CITATION.cff` by default.
    pub fn from_cff_file(path: Option<&Path>, options: &ConversionOptions) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CFF_FILE));
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_cff_string(&text, options)
    }

    /// Wrap an existing span after validating it for `role`.
    pub fn from_coin_span(coin_span: CoinSpan, role: SpanRole) -> Result<Self> {
        classifier::validate(&coin_span, role)?;
        Ok(Self::from_parts(coin_span, Vec::new(), None))
    }

    /// Extract every acceptable span from markup.
    ///
    /// Spans are accepted with the permissive reference rules; invalid
    /// candidates are dropped without error.
    pub fn from_html_string(html: &str, backend: MarkupBackend) -> Vec<Self> {
        CoinsParser::parse(html, backend)
            .into_iter()
            .filter_map(|span| match Self::from_coin_span(span, SpanRole::Reference) {
                Ok(result) => Some(result),
                Err(e) => {
                    debug!(error = %e, "dropping COinS span");
                    None
                }
            })
            .collect()
    }

    /// Extract every acceptable span from a markup file.
    ///
    /// `encoding` is a WHATWG encoding label (`UTF-8` when absent, also
    /// accepting spellings such as `utf_8` or `latin-1`). A byte order mark
    /// for that encoding is removed; malformed input is an error.
    pub fn from_html_file(
        path: &Path,
        encoding: Option<&str>,
        backend: MarkupBackend,
    ) -> Result<Vec<Self>> {
        let label = encoding.unwrap_or(DEFAULT_HTML_ENCODING);
        let encoding = lookup_encoding(label)
            .ok_or_else(|| Error::io(path, format!("unknown encoding '{}'", label)))?;

        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let (html, had_errors) = encoding.decode_with_bom_removal(&bytes);
        if had_errors {
            return Err(Error::io(
                path,
                format!("file is not valid {}", encoding.name()),
            ));
        }
        debug!(encoding = encoding.name(), path = %path.display(), "decoded markup file");
        Ok(Self::from_html_string(&html, backend))
    }

    /// Classify the primary span.
    pub fn classify(&self) -> SpanClass {
        classifier::classify(&self.coin_span)
    }

    /// Render the primary span, and optionally the reference spans, as
    /// COinS markup.
    pub fn to_html_string(&self, with_references: bool) -> Result<String> {
        let mut spans = vec![self.coin_span.clone()];
        if with_references {
            spans.extend(self.references.iter().map(|r| r.coin_span.clone()));
        }
        Ok(CoinsParser::html(&spans)?)
    }

    pub fn to_html_file(&self, path: &Path, with_references: bool) -> Result<()> {
        let html = self.to_html_string(with_references)?;
        fs::write(path, html).map_err(|e| Error::io(path, e))
    }

    /// Convert back to CFF. Not supported.
    pub fn to_cff_string(&self) -> Result<String> {
        Err(Error::Unimplemented {
            operation: "to_cff_string".to_string(),
        })
    }

    /// Convert back to a CFF reference entry. Not supported.
    pub fn to_cff_reference_string(&self) -> Result<String> {
        Err(Error::Unimplemented {
            operation: "to_cff_reference_string".to_string(),
        })
    }
}

fn lookup_encoding(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.as_bytes())
        .or_else(|| Encoding::for_label(label.replace(['-', '_'], "").as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOFTWARE: &str = r#"
cff-version: 1.2.0
message: If you use this software, please cite it as below.
title: Engine
authors:
  - given-names: Ada
    family-names: Lovelace
"#;

    #[test]
    fn test_missing_fields_listed_in_order() {
        let err = CffCoinSpan::from_cff_string("", &ConversionOptions::default()).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Invalid CFF: missing the following required fields: cff-version, message, title, authors");
    }

    #[test]
    fn test_unsupported_version() {
        let text = SOFTWARE.replace("1.2.0", "1.1.0");
        let err = CffCoinSpan::from_cff_string(&text, &ConversionOptions::default()).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedCffVersion {
                found: Some("1.1.0".to_string()),
                supported: vec!["1.2.0".to_string()],
            }
        );
    }

    #[test]
    fn test_software_classifies_as_computer_program() {
        let result = CffCoinSpan::from_cff_string(SOFTWARE, &ConversionOptions::default()).unwrap();
        assert!(result.classify().is_computer_program);
        assert!(result.references().is_empty());
        assert!(result.preferred_citation().is_none());
    }

    #[test]
    fn test_bad_reference_aborts_everything() {
        let text = format!(
            "{}references:\n  - type: book\n    title: Fine\n  - type: poem\n    title: Bad\n",
            SOFTWARE
        );
        let err = CffCoinSpan::from_cff_string(&text, &ConversionOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidType { role: SpanRole::Reference, .. }));
    }

    #[test]
    fn test_from_coin_span_validates_role() {
        let article: CoinSpan = vec![(
            "rft_val_fmt".to_string(),
            "info:ofi/fmt:kev:mtx:journal".to_string(),
        )]
        .into();
        assert!(CffCoinSpan::from_coin_span(article.clone(), SpanRole::Primary).is_err());
        assert!(CffCoinSpan::from_coin_span(article, SpanRole::Reference).is_ok());
    }

    #[test]
    fn test_reverse_conversion_is_unimplemented() {
        let result = CffCoinSpan::from_cff_string(SOFTWARE, &ConversionOptions::default()).unwrap();
        assert!(matches!(result.to_cff_string(), Err(Error::Unimplemented { .. })));
        assert!(matches!(
            result.to_cff_reference_string(),
            Err(Error::Unimplemented { .. })
        ));
    }

    #[test]
    fn test_encoding_labels() {
        for label in ["UTF-8", "utf-8", "utf8", "UTF_8"] {
            assert_eq!(lookup_encoding(label), Some(encoding_rs::UTF_8), "{}", label);
        }
        assert_eq!(lookup_encoding("latin-1"), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(lookup_encoding("ISO-8859-1"), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(lookup_encoding("klingon"), None);
    }

    #[test]
    fn test_empty_markup_yields_no_results() {
        assert!(CffCoinSpan::from_html_string("", MarkupBackend::default()).is_empty());
    }
}
