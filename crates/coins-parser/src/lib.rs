//! COinS (ContextObjects in Spans) markup support.
//!
//! COinS embeds an OpenURL ContextObject in HTML as
//! `<span class="Z3988" title="url_ver=Z39.88-2004&amp;...">`. This crate
//! provides:
//!
//! - [`CoinSpan`]: the ordered key/value terms of one ContextObject
//! - [`CoinsParser::parse`]: extract spans from an HTML document
//! - [`CoinsParser::html`]: render spans as embeddable markup
//!
//! It knows nothing about what the terms mean; deciding whether a span
//! describes software, a dataset or an article is left to the caller.
//!
//! # Example
//!
//! ```rust
//! use coins_parser::{CoinsParser, MarkupBackend};
//!
//! let html = r#"<span class="Z3988" title="ctx_ver=Z39.88-2004&amp;rft.title=cff2coins"></span>"#;
//! let spans = CoinsParser::parse(html, MarkupBackend::default());
//!
//! assert_eq!(spans.len(), 1);
//! assert_eq!(spans[0].first("rft.title"), Some("cff2coins"));
//! ```

pub mod backend;
pub mod error;
pub mod parser;
pub mod render;
pub mod span;

pub use backend::MarkupBackend;
pub use error::{Error, Result};
pub use parser::{COINS_CLASS, CoinsParser};
pub use span::{CoinSpan, CoinSpanList, CoinSpanTerm};
