//! Caller-supplied overrides for a conversion.

/// Overrides applied while compiling a citation record.
///
/// Empty strings count as "not set" for `publisher` and `language`. The
/// `referrer_id` is validated when a span is compiled and must look like
/// `<authority>:<id>`; when unset, [`crate::DEFAULT_REFERRER_ID`] is used.
///
/// ```
/// use cff2coins::ConversionOptions;
///
/// let options = ConversionOptions::default()
///     .with_publisher("Zenodo")
///     .with_referrer_id("example.org:site");
/// assert_eq!(options.publisher.as_deref(), Some("Zenodo"));
/// assert_eq!(options.language, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub referrer_id: Option<String>,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_referrer_id(mut self, referrer_id: impl Into<String>) -> Self {
        self.referrer_id = Some(referrer_id.into());
        self
    }

    /// The publisher override, if set to a non-empty value.
    pub fn publisher_override(&self) -> Option<&str> {
        self.publisher.as_deref().filter(|p| !p.is_empty())
    }

    /// The language override, if set to a non-empty value.
    pub fn language_override(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }

    /// Options for records nested under the primary one.
    ///
    /// Publisher and language overrides describe the primary work only, so
    /// nested records keep just the referrer id.
    pub fn for_nested(&self) -> Self {
        Self {
            publisher: None,
            language: None,
            referrer_id: self.referrer_id.clone(),
        }
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: ConversionOptions) -> Self {
        Self {
            publisher: self.publisher.or(fallback.publisher),
            language: self.language.or(fallback.language),
            referrer_id: self.referrer_id.or(fallback.referrer_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_are_unset() {
        let options = ConversionOptions::new().with_publisher("").with_language("");
        assert_eq!(options.publisher_override(), None);
        assert_eq!(options.language_override(), None);
    }

    #[test]
    fn test_for_nested_keeps_referrer_only() {
        let options = ConversionOptions::new()
            .with_publisher("Zenodo")
            .with_language("en")
            .with_referrer_id("a:b");
        let nested = options.for_nested();
        assert_eq!(nested.publisher, None);
        assert_eq!(nested.language, None);
        assert_eq!(nested.referrer_id.as_deref(), Some("a:b"));
    }

    #[test]
    fn test_or_prefers_self() {
        let flags = ConversionOptions::new().with_language("de");
        let file = ConversionOptions::new()
            .with_language("en")
            .with_publisher("Zenodo");
        let merged = flags.or(file);
        assert_eq!(merged.language.as_deref(), Some("de"));
        assert_eq!(merged.publisher.as_deref(), Some("Zenodo"));
    }
}
