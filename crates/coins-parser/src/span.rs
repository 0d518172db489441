//! The COinS span model: an ordered list of key/value terms.
//!
//! Keys repeat (several `rft.au` authors, several `rft_id` identifiers), so a
//! span is a sequence rather than a map, and the order of its terms is kept
//! exactly as produced.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// One `(key, value)` term of a span.
pub type CoinSpanTerm = (String, String);

/// The spans found in, or rendered into, one markup document.
pub type CoinSpanList = Vec<CoinSpan>;

/// An ordered sequence of metadata terms describing one resource.
///
/// Serializes as a JSON list of two-element arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinSpan {
    terms: Vec<CoinSpanTerm>,
}

impl CoinSpan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term at the end of the span.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.terms.push((key.into(), value.into()));
    }

    /// Append every term of `other`, keeping its order.
    pub fn append(&mut self, other: CoinSpan) {
        self.terms.extend(other.terms);
    }

    pub fn terms(&self) -> &[CoinSpanTerm] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<CoinSpanTerm> {
        self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoinSpanTerm> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True if some term has exactly this key and value.
    pub fn has_term(&self, key: &str, value: &str) -> bool {
        self.terms.iter().any(|(k, v)| k == key && v == value)
    }

    /// All values recorded under `key`, in span order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.terms
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The first value recorded under `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Encode the span as an OpenURL key/encoded-value (KEV) query string.
    ///
    /// ```
    /// use coins_parser::CoinSpan;
    ///
    /// let span: CoinSpan = vec![
    ///     ("ctx_ver".to_string(), "Z39.88-2004".to_string()),
    ///     ("rft.title".to_string(), "A & B".to_string()),
    /// ]
    /// .into();
    /// assert_eq!(span.to_kev(), "ctx_ver=Z39.88-2004&rft.title=A+%26+B");
    /// ```
    pub fn to_kev(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.terms.iter())
            .finish()
    }

    /// Decode a KEV query string. Empty input yields an empty span.
    pub fn from_kev(kev: &str) -> Self {
        form_urlencoded::parse(kev.trim().as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

impl From<Vec<CoinSpanTerm>> for CoinSpan {
    fn from(terms: Vec<CoinSpanTerm>) -> Self {
        Self { terms }
    }
}

impl FromIterator<CoinSpanTerm> for CoinSpan {
    fn from_iter<I: IntoIterator<Item = CoinSpanTerm>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl Extend<CoinSpanTerm> for CoinSpan {
    fn extend<I: IntoIterator<Item = CoinSpanTerm>>(&mut self, iter: I) {
        self.terms.extend(iter);
    }
}

impl IntoIterator for CoinSpan {
    type Item = CoinSpanTerm;
    type IntoIter = std::vec::IntoIter<CoinSpanTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a CoinSpan {
    type Item = &'a CoinSpanTerm;
    type IntoIter = std::slice::Iter<'a, CoinSpanTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
