use std::fmt;

/// Where a citation record sits in the result tree.
///
/// The role decides which `type` values are accepted when compiling a record
/// and how strictly the resulting span is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpanRole {
    /// The top-level record; must describe software or a dataset.
    #[default]
    Primary,
    /// An entry of the record's `references` list.
    Reference,
    /// The record's `preferred-citation`.
    PreferredCitation,
}

impl SpanRole {
    pub fn is_primary(self) -> bool {
        self == SpanRole::Primary
    }
}

impl fmt::Display for SpanRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanRole::Primary => write!(f, "primary citation"),
            SpanRole::Reference => write!(f, "reference"),
            SpanRole::PreferredCitation => write!(f, "preferred citation"),
        }
    }
}
