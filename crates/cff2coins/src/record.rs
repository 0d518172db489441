//! Typed citation records.
//!
//! A [`CitationRecord`] is the typed form of one CFF work: the top-level
//! document, its `preferred-citation`, or one of its `references`. Every
//! field is optional here; required-field checks happen once, when the
//! result tree is built.

/// Top-level fields every CFF document must declare, in reporting order.
pub const REQUIRED_CFF_FIELDS: [&str; 4] = ["cff-version", "message", "title", "authors"];

/// CFF schema versions this crate knows how to convert.
pub const SUPPORTED_CFF_VERSIONS: [&str; 1] = ["1.2.0"];

/// One work described by a citation file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitationRecord {
    pub cff_version: Option<String>,
    pub message: Option<String>,
    pub title: Option<String>,
    pub authors: Option<Vec<Author>>,
    pub date_released: Option<String>,
    pub abstract_text: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    /// The CFF `type`: `software`, `dataset`, or a reference type tag.
    pub record_type: Option<String>,
    pub doi: Option<String>,
    pub identifiers: Vec<Identifier>,
    pub preferred_citation: Option<Box<CitationRecord>>,
    pub references: Vec<CitationRecord>,
}

impl CitationRecord {
    /// Names of the required top-level fields this record lacks.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let present = [
            self.cff_version.is_some(),
            self.message.is_some(),
            self.title.is_some(),
            self.authors.is_some(),
        ];
        REQUIRED_CFF_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(field, _)| *field)
            .collect()
    }

    pub fn has_supported_version(&self) -> bool {
        self.cff_version
            .as_deref()
            .is_some_and(|v| SUPPORTED_CFF_VERSIONS.contains(&v))
    }

    pub fn authors(&self) -> &[Author] {
        self.authors.as_deref().unwrap_or_default()
    }
}

/// A person or entity credited on a work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    /// Entity name, or a person's full name when given explicitly.
    pub name: Option<String>,
    pub given_names: Option<String>,
    pub name_particle: Option<String>,
    pub family_names: Option<String>,
    pub name_suffix: Option<String>,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn person(given_names: impl Into<String>, family_names: impl Into<String>) -> Self {
        Self {
            given_names: Some(given_names.into()),
            family_names: Some(family_names.into()),
            ..Default::default()
        }
    }

    /// The name shown in an `rft.au` term.
    ///
    /// An explicit `name` wins. Otherwise the name parts are joined with
    /// single spaces (given, particle, family, suffix). Returns `None` when
    /// nothing usable is left.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return Some(name.to_string());
        }

        let parts: Vec<&str> = [
            &self.given_names,
            &self.name_particle,
            &self.family_names,
            &self.name_suffix,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref().map(str::trim))
        .filter(|part| !part.is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// The kind of an entry in a record's `identifiers` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Doi,
    Url,
    /// Software Heritage archival identifier.
    Swh,
    Other,
    /// A type this crate does not convert; such identifiers are skipped.
    Unknown(String),
}

impl IdentifierKind {
    pub fn from_cff_type(value: &str) -> Self {
        match value {
            "doi" => IdentifierKind::Doi,
            "url" => IdentifierKind::Url,
            "swh" | "swf" => IdentifierKind::Swh,
            "other" => IdentifierKind::Other,
            unknown => IdentifierKind::Unknown(unknown.to_string()),
        }
    }
}

/// One `{type, value}` entry of a record's `identifiers` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub kind: IdentifierKind,
    pub value: String,
}

impl Identifier {
    pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_fields_in_table_order() {
        let record = CitationRecord {
            message: Some("Cite me".to_string()),
            ..Default::default()
        };
        assert_eq!(
            record.missing_required_fields(),
            vec!["cff-version", "title", "authors"]
        );
    }

    #[test]
    fn test_empty_author_list_counts_as_present() {
        let record = CitationRecord {
            cff_version: Some("1.2.0".to_string()),
            message: Some("m".to_string()),
            title: Some("t".to_string()),
            authors: Some(vec![]),
            ..Default::default()
        };
        assert!(record.missing_required_fields().is_empty());
        assert!(record.has_supported_version());
    }

    #[test]
    fn test_display_name_prefers_explicit_name() {
        let mut author = Author::person("Ada", "Lovelace");
        assert_eq!(author.display_name().as_deref(), Some("Ada Lovelace"));

        author.name = Some("The Analytical Engine Team".to_string());
        assert_eq!(
            author.display_name().as_deref(),
            Some("The Analytical Engine Team")
        );
    }

    #[test]
    fn test_display_name_places_particle_and_suffix() {
        let author = Author {
            given_names: Some("Ludwig".to_string()),
            name_particle: Some("van".to_string()),
            family_names: Some("Beethoven".to_string()),
            name_suffix: Some("Jr.".to_string()),
            ..Default::default()
        };
        assert_eq!(
            author.display_name().as_deref(),
            Some("Ludwig van Beethoven Jr.")
        );
    }

    #[test]
    fn test_display_name_single_part() {
        let author = Author {
            family_names: Some("Plato".to_string()),
            ..Default::default()
        };
        assert_eq!(author.display_name().as_deref(), Some("Plato"));
        assert_eq!(Author::default().display_name(), None);
    }

    #[test]
    fn test_identifier_kind_aliases() {
        assert_eq!(IdentifierKind::from_cff_type("swh"), IdentifierKind::Swh);
        assert_eq!(IdentifierKind::from_cff_type("swf"), IdentifierKind::Swh);
        assert_eq!(
            IdentifierKind::from_cff_type("isbn"),
            IdentifierKind::Unknown("isbn".to_string())
        );
    }
}
