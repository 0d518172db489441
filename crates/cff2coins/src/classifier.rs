//! Classifying and validating COinS spans.

use coins_parser::CoinSpan;
use tracing::trace;

use crate::error::{Error, Result};
use crate::reference_type::MetadataFormat;
use crate::role::SpanRole;

/// `rft.type` that marks a Dublin Core span as a dataset.
///
/// Spans this crate compiles write `Dataset`; recognition only accepts
/// `DataSet`. Dataset spans are still recognised through their
/// `info:ofi/fmt:kev:mtx:data` marker.
pub const DC_TYPE_DATASET_MARKER: &str = "DataSet";

/// What a span describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanClass {
    pub is_computer_program: bool,
    pub is_dataset: bool,
}

impl SpanClass {
    pub fn is_software_or_dataset(self) -> bool {
        self.is_computer_program || self.is_dataset
    }
}

/// Decide whether a span describes a computer program and/or a dataset.
pub fn classify(span: &CoinSpan) -> SpanClass {
    let has_format = |format: MetadataFormat| span.has_term("rft_val_fmt", format.uri());
    let is_dc = has_format(MetadataFormat::Dc);

    SpanClass {
        is_computer_program: has_format(MetadataFormat::ComputerProgram)
            || (is_dc && span.has_term("rft.type", "computerProgram")),
        is_dataset: has_format(MetadataFormat::Data)
            || (is_dc && span.has_term("rft.type", DC_TYPE_DATASET_MARKER)),
    }
}

/// Check that `span` is acceptable in `role`.
///
/// Every span must have at least one term. A primary span must also
/// describe software or a dataset; references and preferred citations may
/// describe anything.
pub fn validate(span: &CoinSpan, role: SpanRole) -> Result<SpanClass> {
    if span.is_empty() {
        return Err(Error::InvalidSpanStructure);
    }

    let class = classify(span);
    trace!(role = %role, ?class, "classified COinS span");

    if role.is_primary() && !class.is_software_or_dataset() {
        return Err(Error::NotSoftwareOrDataset);
    }
    Ok(class)
}

/// Convenience wrapper around [`validate`].
pub fn is_valid(span: &CoinSpan, role: SpanRole) -> bool {
    validate(span, role).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(terms: &[(&str, &str)]) -> CoinSpan {
        terms
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_computer_program_by_format() {
        let s = span(&[("rft_val_fmt", "info:ofi/fmt:kev:mtx:computerProgram")]);
        let class = classify(&s);
        assert!(class.is_computer_program);
        assert!(!class.is_dataset);
    }

    #[test]
    fn test_computer_program_by_dublin_core() {
        let s = span(&[
            ("rft_val_fmt", "info:ofi/fmt:kev:mtx:dc"),
            ("rft.type", "computerProgram"),
        ]);
        assert!(classify(&s).is_computer_program);

        let without_dc = span(&[("rft.type", "computerProgram")]);
        assert!(!classify(&without_dc).is_computer_program);
    }

    #[test]
    fn test_dataset_dublin_core_type_is_case_sensitive() {
        let data_set = span(&[
            ("rft_val_fmt", "info:ofi/fmt:kev:mtx:dc"),
            ("rft.type", "DataSet"),
        ]);
        assert!(classify(&data_set).is_dataset);

        let dataset = span(&[
            ("rft_val_fmt", "info:ofi/fmt:kev:mtx:dc"),
            ("rft.type", "Dataset"),
        ]);
        assert!(!classify(&dataset).is_dataset);
    }

    #[test]
    fn test_dataset_by_format() {
        let s = span(&[("rft_val_fmt", "info:ofi/fmt:kev:mtx:data")]);
        assert!(classify(&s).is_dataset);
    }

    #[test]
    fn test_empty_span_is_structurally_invalid() {
        for role in [SpanRole::Primary, SpanRole::Reference, SpanRole::PreferredCitation] {
            assert_eq!(
                validate(&CoinSpan::new(), role),
                Err(Error::InvalidSpanStructure)
            );
        }
    }

    #[test]
    fn test_primary_requires_software_or_dataset() {
        let article = span(&[
            ("rft_val_fmt", "info:ofi/fmt:kev:mtx:journal"),
            ("rft.title", "Paper"),
        ]);
        assert_eq!(
            validate(&article, SpanRole::Primary),
            Err(Error::NotSoftwareOrDataset)
        );
        assert!(is_valid(&article, SpanRole::Reference));
        assert!(is_valid(&article, SpanRole::PreferredCitation));
    }
}
