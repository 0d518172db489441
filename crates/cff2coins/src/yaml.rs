//! Loading citation records from CFF YAML.
//!
//! Conversion is lenient about scalar types: numbers and booleans become
//! strings, so `version: 1.0` yields `"1.0"`. A key whose value is `null`
//! is treated as absent.

use tracing::trace;
use yaml_rust2::{Yaml, YamlLoader};

use crate::error::{Error, Result};
use crate::record::{Author, CitationRecord, Identifier, IdentifierKind};

/// Parse CFF text into a [`CitationRecord`].
///
/// Empty input, or a document that is just `null`, yields an empty record
/// so that validation can report every missing field.
///
/// ```
/// let record = cff2coins::yaml::parse_citation("title: cff2coins\nversion: 1.0\n").unwrap();
/// assert_eq!(record.title.as_deref(), Some("cff2coins"));
/// assert_eq!(record.version.as_deref(), Some("1.0"));
/// ```
pub fn parse_citation(text: &str) -> Result<CitationRecord> {
    let docs = YamlLoader::load_from_str(text).map_err(|e| Error::yaml(e.to_string()))?;

    match docs.into_iter().next() {
        None | Some(Yaml::Null) => Ok(CitationRecord::default()),
        Some(doc @ Yaml::Hash(_)) => record_from_yaml(&doc, "document"),
        Some(_) => Err(Error::yaml("the top-level document must be a mapping")),
    }
}

fn record_from_yaml(node: &Yaml, context: &str) -> Result<CitationRecord> {
    if node.as_hash().is_none() {
        return Err(Error::yaml(format!("{} must be a mapping", context)));
    }

    let preferred_citation = match field(node, "preferred-citation") {
        Some(value) => Some(Box::new(record_from_yaml(value, "`preferred-citation`")?)),
        None => None,
    };

    let references = match field(node, "references") {
        Some(value) => {
            let entries = value
                .as_vec()
                .ok_or_else(|| Error::yaml("`references` must be a list"))?;
            entries
                .iter()
                .enumerate()
                .map(|(i, entry)| record_from_yaml(entry, &format!("`references[{}]`", i)))
                .collect::<Result<Vec<_>>>()?
        }
        None => Vec::new(),
    };

    let authors = match field(node, "authors") {
        Some(value) => Some(authors_from_yaml(value)?),
        None => None,
    };

    Ok(CitationRecord {
        cff_version: string_field(node, "cff-version")?,
        message: string_field(node, "message")?,
        title: string_field(node, "title")?,
        authors,
        date_released: string_field(node, "date-released")?,
        abstract_text: string_field(node, "abstract")?,
        version: string_field(node, "version")?,
        license: license_field(node)?,
        publisher: entity_name_field(node, "publisher")?,
        language: string_field(node, "language")?,
        record_type: string_field(node, "type")?,
        doi: string_field(node, "doi")?,
        identifiers: identifiers_field(node)?,
        preferred_citation,
        references,
    })
}

/// A present, non-null value under `key`.
fn field<'a>(node: &'a Yaml, key: &str) -> Option<&'a Yaml> {
    let value = &node[key];
    if value.is_badvalue() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn scalar_to_string(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_field(node: &Yaml, key: &str) -> Result<Option<String>> {
    match field(node, key) {
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or_else(|| Error::yaml(format!("`{}` must be a scalar value", key))),
        None => Ok(None),
    }
}

/// `license` is either one SPDX id or a list of them.
fn license_field(node: &Yaml) -> Result<Option<String>> {
    match field(node, "license") {
        Some(Yaml::Array(items)) => {
            let licenses = items
                .iter()
                .map(|item| {
                    scalar_to_string(item)
                        .ok_or_else(|| Error::yaml("`license` entries must be scalar values"))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(licenses.join(", ")))
        }
        Some(_) => string_field(node, "license"),
        None => Ok(None),
    }
}

/// Fields such as `publisher` hold a CFF entity; only its name is kept.
fn entity_name_field(node: &Yaml, key: &str) -> Result<Option<String>> {
    match field(node, key) {
        Some(entity @ Yaml::Hash(_)) => string_field(entity, "name"),
        Some(_) => string_field(node, key),
        None => Ok(None),
    }
}

fn authors_from_yaml(value: &Yaml) -> Result<Vec<Author>> {
    let entries = value
        .as_vec()
        .ok_or_else(|| Error::yaml("`authors` must be a list"))?;

    entries
        .iter()
        .map(|entry| {
            if entry.as_hash().is_none() {
                return Err(Error::yaml("each entry of `authors` must be a mapping"));
            }
            Ok(Author {
                name: string_field(entry, "name")?,
                given_names: first_string_field(entry, &["given-names", "given-name"])?,
                name_particle: string_field(entry, "name-particle")?,
                family_names: first_string_field(entry, &["family-names", "family-name"])?,
                name_suffix: string_field(entry, "name-suffix")?,
            })
        })
        .collect()
}

fn first_string_field(node: &Yaml, keys: &[&str]) -> Result<Option<String>> {
    for key in keys {
        if let Some(value) = string_field(node, key)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn identifiers_field(node: &Yaml) -> Result<Vec<Identifier>> {
    let Some(value) = field(node, "identifiers") else {
        return Ok(Vec::new());
    };
    let entries = value
        .as_vec()
        .ok_or_else(|| Error::yaml("`identifiers` must be a list"))?;

    let mut identifiers = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.as_hash().is_none() {
            return Err(Error::yaml("each entry of `identifiers` must be a mapping"));
        }
        let kind = string_field(entry, "type")?.unwrap_or_default();
        let value = string_field(entry, "value")?.unwrap_or_default();
        trace!(kind = %kind, value = %value, "read identifier");
        identifiers.push(Identifier::new(IdentifierKind::from_cff_type(&kind), value));
    }
    Ok(identifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_empty_record() {
        assert_eq!(parse_citation("").unwrap(), CitationRecord::default());
        assert_eq!(parse_citation("~\n").unwrap(), CitationRecord::default());
    }

    #[test]
    fn test_non_mapping_document_is_an_error() {
        let err = parse_citation("- a\n- b\n").unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }), "Got: {}", err);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let err = parse_citation("title: [unclosed\n").unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }), "Got: {}", err);
    }

    #[test]
    fn test_scalars_become_strings() {
        let record = parse_citation(
            "cff-version: 1.2.0\nversion: 2\ndate-released: 2024-05-01\ntitle: true\n",
        )
        .unwrap();
        assert_eq!(record.cff_version.as_deref(), Some("1.2.0"));
        assert_eq!(record.version.as_deref(), Some("2"));
        assert_eq!(record.date_released.as_deref(), Some("2024-05-01"));
        assert_eq!(record.title.as_deref(), Some("true"));
    }

    #[test]
    fn test_null_values_are_absent() {
        let record = parse_citation("title:\nauthors:\n").unwrap();
        assert_eq!(record.title, None);
        assert_eq!(record.authors, None);
    }

    #[test]
    fn test_authors() {
        let record = parse_citation(
            r#"
authors:
  - given-names: Ada
    family-names: Lovelace
  - name: The Engine Team
  - given-name: Ludwig
    name-particle: van
    family-name: Beethoven
"#,
        )
        .unwrap();
        let names: Vec<String> = record
            .authors()
            .iter()
            .filter_map(Author::display_name)
            .collect();
        assert_eq!(
            names,
            vec!["Ada Lovelace", "The Engine Team", "Ludwig van Beethoven"]
        );
    }

    #[test]
    fn test_license_list_and_publisher_entity() {
        let record = parse_citation(
            "license:\n  - MIT\n  - Apache-2.0\npublisher:\n  name: Zenodo\n  city: Geneva\n",
        )
        .unwrap();
        assert_eq!(record.license.as_deref(), Some("MIT, Apache-2.0"));
        assert_eq!(record.publisher.as_deref(), Some("Zenodo"));
    }

    #[test]
    fn test_identifiers() {
        let record = parse_citation(
            r#"
identifiers:
  - type: doi
    value: 10.5281/zenodo.1
  - type: swh
    value: "swh:1:rel:99"
  - type: isbn
    value: 978-3-16
  - type: url
"#,
        )
        .unwrap();
        assert_eq!(
            record.identifiers,
            vec![
                Identifier::new(IdentifierKind::Doi, "10.5281/zenodo.1"),
                Identifier::new(IdentifierKind::Swh, "swh:1:rel:99"),
                Identifier::new(IdentifierKind::Unknown("isbn".to_string()), "978-3-16"),
                Identifier::new(IdentifierKind::Url, ""),
            ]
        );
    }

    #[test]
    fn test_nested_records() {
        let record = parse_citation(
            r#"
title: Outer
preferred-citation:
  type: article
  title: Inner
references:
  - type: book
    title: First
  - type: report
    title: Second
"#,
        )
        .unwrap();
        let preferred = record.preferred_citation.as_deref().unwrap();
        assert_eq!(preferred.title.as_deref(), Some("Inner"));
        assert_eq!(preferred.record_type.as_deref(), Some("article"));
        assert_eq!(record.references.len(), 2);
        assert_eq!(record.references[1].title.as_deref(), Some("Second"));
    }

    #[test]
    fn test_reference_must_be_mapping() {
        let err = parse_citation("references:\n  - just a string\n").unwrap_err();
        assert!(err.to_string().contains("`references[0]` must be a mapping"), "Got: {}", err);
    }
}
