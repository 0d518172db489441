/*
 * config.rs
 * Copyright (c) 2025 cff2coins contributors
 *
 * Conversion options from flags and config files
 */

//! Conversion options from command-line flags and an optional YAML file.
//!
//! A config file may set any of:
//!
//! ```yaml
//! publisher: Zenodo
//! language: en
//! referrer-id: example.org:docs
//! ```
//!
//! Flags take precedence over the file.

use anyhow::{Context, Result, bail};
use cff2coins::ConversionOptions;
use std::fs;
use std::path::Path;
use tracing::debug;
use yaml_rust2::{Yaml, YamlLoader};

use crate::OverrideArgs;

const KNOWN_KEYS: [&str; 3] = ["publisher", "language", "referrer-id"];

/// Resolve the options for a conversion.
pub fn resolve_options(args: &OverrideArgs) -> Result<ConversionOptions> {
    let flags = ConversionOptions {
        publisher: args.publisher.clone(),
        language: args.language.clone(),
        referrer_id: args.referrer_id.clone(),
    };

    match &args.config {
        Some(path) => Ok(flags.or(load_config(path)?)),
        None => Ok(flags),
    }
}

fn load_config(path: &Path) -> Result<ConversionOptions> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

fn parse_config(content: &str) -> Result<ConversionOptions> {
    let docs = YamlLoader::load_from_str(content)?;
    let Some(doc) = docs.into_iter().next() else {
        return Ok(ConversionOptions::default());
    };

    let hash = match &doc {
        Yaml::Hash(hash) => hash,
        Yaml::Null => return Ok(ConversionOptions::default()),
        _ => bail!("config must be a mapping"),
    };

    for key in hash.keys() {
        match key.as_str() {
            Some(k) if KNOWN_KEYS.contains(&k) => {}
            Some(k) => bail!("unknown config key '{}'", k),
            None => bail!("config keys must be strings"),
        }
    }

    let options = ConversionOptions {
        publisher: string_value(&doc, "publisher")?,
        language: string_value(&doc, "language")?,
        referrer_id: string_value(&doc, "referrer-id")?,
    };
    debug!(?options, "loaded config file");
    Ok(options)
}

fn string_value(doc: &Yaml, key: &str) -> Result<Option<String>> {
    match &doc[key] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::String(s) => Ok(Some(s.clone())),
        _ => bail!("'{}' must be a string", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let options =
            parse_config("publisher: Zenodo\nlanguage: en\nreferrer-id: example.org:docs\n")
                .unwrap();
        assert_eq!(options.publisher.as_deref(), Some("Zenodo"));
        assert_eq!(options.language.as_deref(), Some("en"));
        assert_eq!(options.referrer_id.as_deref(), Some("example.org:docs"));
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(parse_config("").unwrap(), ConversionOptions::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_config("publsher: Zenodo\n").unwrap_err();
        assert!(err.to_string().contains("publsher"), "Got: {}", err);
    }

    #[test]
    fn test_non_string_value_rejected() {
        assert!(parse_config("language:\n  - en\n").is_err());
    }

    #[test]
    fn test_flags_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cff2coins.yaml");
        fs::write(&path, "publisher: Zenodo\nlanguage: en\n").unwrap();

        let args = OverrideArgs {
            language: Some("de".to_string()),
            config: Some(path),
            ..Default::default()
        };
        let options = resolve_options(&args).unwrap();
        assert_eq!(options.publisher.as_deref(), Some("Zenodo"));
        assert_eq!(options.language.as_deref(), Some("de"));
        assert_eq!(options.referrer_id, None);
    }
}
