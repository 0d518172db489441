//! Compiling citation records into COinS spans.
//!
//! Term order is part of the output contract. A span is laid out as:
//!
//! 1. framing: `url_ver`, `ctx_ver`, `rfr_id`
//! 2. format markers (`rft_val_fmt`, plus `rft.genre`/`rft.type` for
//!    reference types)
//! 3. common terms: title, date, description, version, rights, language,
//!    publisher, identifiers, authors
//! 4. for software and datasets, a trailing Dublin Core block
//!    (`rft_val_fmt=info:ofi/fmt:kev:mtx:dc` and `rft.type`)

use coins_parser::CoinSpan;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::options::ConversionOptions;
use crate::record::{CitationRecord, IdentifierKind};
use crate::reference_type::{self, MetadataFormat};
use crate::role::SpanRole;

/// OpenURL version used for both `url_ver` and `ctx_ver`.
pub const Z39_88_2004: &str = "Z39.88-2004";

/// Referrer id used when the caller does not supply one.
pub const DEFAULT_REFERRER_ID: &str =
    concat!("github.willynilly:cff2coins-", env!("CARGO_PKG_VERSION"));

/// `rft.type` written in the Dublin Core block of a software span.
pub const DC_TYPE_COMPUTER_PROGRAM: &str = "computerProgram";

/// `rft.type` written in the Dublin Core block of a dataset span.
pub const DC_TYPE_DATASET: &str = "Dataset";

const DOI_RESOLVER: &str = "https://doi.org/";
const SWH_RESOLVER: &str = "https://archive.softwareheritage.org/";

/// Compile one record into a span.
///
/// The record is not checked for required top-level fields here; that is
/// the caller's job. Only `title` is needed to build a span.
pub fn compile(
    record: &CitationRecord,
    role: SpanRole,
    options: &ConversionOptions,
) -> Result<CoinSpan> {
    let referrer_id = validate_referrer_id(options.referrer_id.as_deref())?;

    let mut span = CoinSpan::new();
    span.push("url_ver", Z39_88_2004);
    span.push("ctx_ver", Z39_88_2004);
    span.push("rfr_id", format!("info:sid/{}", referrer_id));

    let common = common_terms(record, role, options)?;

    match (role, record.record_type.as_deref()) {
        (SpanRole::Primary, None) | (_, Some("software")) => {
            span.push("rft_val_fmt", MetadataFormat::ComputerProgram.uri());
            span.append(common);
            span.push("rft_val_fmt", MetadataFormat::Dc.uri());
            span.push("rft.type", DC_TYPE_COMPUTER_PROGRAM);
        }
        (_, Some("dataset")) => {
            span.push("rft_val_fmt", MetadataFormat::Data.uri());
            span.append(common);
            span.push("rft_val_fmt", MetadataFormat::Dc.uri());
            span.push("rft.type", DC_TYPE_DATASET);
        }
        (SpanRole::Primary, Some(other)) => {
            return Err(Error::InvalidType {
                found: Some(other.to_string()),
                role,
            });
        }
        (_, None) => return Err(Error::InvalidType { found: None, role }),
        (_, Some(tag)) => {
            let reference_type = reference_type::lookup(tag).ok_or_else(|| Error::InvalidType {
                found: Some(tag.to_string()),
                role,
            })?;
            span.push("rft_val_fmt", reference_type.format.uri());
            if let Some(genre) = reference_type.genre {
                span.push("rft.genre", genre);
            }
            span.push("rft.type", reference_type.dc_type);
            span.append(common);
        }
    }

    debug!(
        role = %role,
        record_type = record.record_type.as_deref().unwrap_or("software"),
        terms = span.len(),
        "compiled COinS span"
    );
    Ok(span)
}

/// Check a referrer id override, falling back to [`DEFAULT_REFERRER_ID`].
pub fn validate_referrer_id(referrer_id: Option<&str>) -> Result<&str> {
    match referrer_id {
        None => Ok(DEFAULT_REFERRER_ID),
        Some(value) if value.split(':').count() == 2 => Ok(value),
        Some(value) => Err(Error::InvalidReferrerId {
            value: value.to_string(),
        }),
    }
}

fn common_terms(
    record: &CitationRecord,
    role: SpanRole,
    options: &ConversionOptions,
) -> Result<CoinSpan> {
    let title = record.title.as_deref().ok_or_else(|| Error::MissingField {
        field: "title".to_string(),
        role,
    })?;

    let mut terms = CoinSpan::new();
    terms.push("rft.title", title);

    let optional = [
        ("rft.date", &record.date_released),
        ("rft.description", &record.abstract_text),
        ("rft.version", &record.version),
        ("rft.rights", &record.license),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            terms.push(key, value.as_str());
        }
    }

    if let Some(language) = overridable(options.language_override(), &record.language, role) {
        terms.push("rft.language", language);
    }
    if let Some(publisher) = overridable(options.publisher_override(), &record.publisher, role) {
        terms.push("rft.publisher", publisher);
    }

    terms.append(identifier_terms(record));

    for author in record.authors() {
        match author.display_name() {
            Some(name) => terms.push("rft.au", name),
            None => trace!("skipping author without a name"),
        }
    }

    Ok(terms)
}

/// An override wins; nested records fall back to their own value.
fn overridable<'a>(
    override_value: Option<&'a str>,
    own: &'a Option<String>,
    role: SpanRole,
) -> Option<&'a str> {
    match override_value {
        Some(value) => Some(value),
        None if !role.is_primary() => own.as_deref(),
        None => None,
    }
}

fn identifier_terms(record: &CitationRecord) -> CoinSpan {
    let mut terms = CoinSpan::new();

    if let Some(doi) = non_blank(record.doi.as_deref()) {
        terms.push("rft_id", resolve_doi(doi));
    }

    for identifier in &record.identifiers {
        let Some(value) = non_blank(Some(&identifier.value)) else {
            trace!(kind = ?identifier.kind, "skipping blank identifier");
            continue;
        };
        match &identifier.kind {
            IdentifierKind::Doi => terms.push("rft_id", resolve_doi(value)),
            IdentifierKind::Url => terms.push("rft_id", value),
            IdentifierKind::Swh => terms.push("rft_id", resolve_swh(value)),
            IdentifierKind::Other => terms.push("rft.identifier", value),
            IdentifierKind::Unknown(kind) => {
                trace!(kind = %kind, "skipping identifier of unsupported type");
            }
        }
    }

    terms
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve a DOI, stripping one `info:doi/` or `doi:` prefix.
///
/// ```
/// use cff2coins::compiler::resolve_doi;
///
/// assert_eq!(resolve_doi("10.1/x"), "https://doi.org/10.1/x");
/// assert_eq!(resolve_doi("doi:10.1/x"), "https://doi.org/10.1/x");
/// assert_eq!(resolve_doi("info:doi/10.1/x"), "https://doi.org/10.1/x");
/// ```
pub fn resolve_doi(doi: &str) -> String {
    let id = doi
        .strip_prefix("info:doi/")
        .or_else(|| doi.strip_prefix("doi:"))
        .unwrap_or(doi);
    format!("{}{}", DOI_RESOLVER, id)
}

/// Resolve a Software Heritage identifier to its archive URL.
pub fn resolve_swh(swhid: &str) -> String {
    if swhid.starts_with("swh:") {
        format!("{}{}", SWH_RESOLVER, swhid)
    } else {
        format!("{}swh:{}", SWH_RESOLVER, swhid)
    }
}
