//! Convert Citation File Format (CFF) metadata into COinS spans, and back.
//!
//! COinS ("ContextObjects in Spans") embeds OpenURL citation metadata in
//! HTML, where reference managers such as Zotero pick it up. This crate
//! compiles a `CITATION.cff` document into the ordered key/value terms of a
//! COinS span, one for the work itself plus one per reference, and can
//! recover software and dataset spans from existing markup.
//!
//! # Example
//!
//! ```rust
//! use cff2coins::{CffCoinSpan, ConversionOptions};
//!
//! let cff = r#"
//! cff-version: 1.2.0
//! message: Please cite this software.
//! title: cff2coins
//! authors:
//!   - given-names: Ada
//!     family-names: Lovelace
//! doi: 10.5281/zenodo.1234
//! "#;
//!
//! let result = CffCoinSpan::from_cff_string(cff, &ConversionOptions::default()).unwrap();
//! assert!(result.classify().is_computer_program);
//! assert_eq!(
//!     result.coin_span().first("rft_id"),
//!     Some("https://doi.org/10.5281/zenodo.1234")
//! );
//!
//! let html = result.to_html_string(false).unwrap();
//! assert!(html.starts_with(r#"<span class="Z3988""#));
//! ```

pub mod cff_coin_span;
pub mod classifier;
pub mod compiler;
pub mod error;
pub mod json;
pub mod options;
pub mod record;
pub mod reference_type;
pub mod role;
pub mod yaml;

pub use cff_coin_span::{CffCoinSpan, DEFAULT_CFF_FILE, DEFAULT_HTML_ENCODING};
pub use classifier::{SpanClass, classify, validate};
pub use compiler::{DEFAULT_REFERRER_ID, compile};
pub use error::{Error, Result};
pub use json::{DecodedJson, decode_json_str, decode_json_value, to_json_list_string};
pub use options::ConversionOptions;
pub use record::{
    Author, CitationRecord, Identifier, IdentifierKind, REQUIRED_CFF_FIELDS,
    SUPPORTED_CFF_VERSIONS,
};
pub use role::SpanRole;

pub use coins_parser::{CoinSpan, CoinSpanList, CoinSpanTerm, MarkupBackend};
