//! Error reporting and diagnostic messages for cff2coins.
//!
//! Every fallible conversion in cff2coins can describe its failure as a
//! [`DiagnosticMessage`]: a tidyverse-style message with a title, a problem
//! statement, bulleted details and hints. Messages carry a stable error code
//! (`C-<subsystem>-<number>`) that is looked up in an embedded catalog.
//!
//! # Example
//!
//! ```
//! use cff2coins_error_reporting::DiagnosticMessageBuilder;
//!
//! let error = DiagnosticMessageBuilder::error("Missing Required CFF Fields")
//!     .with_code("C-1-1")
//!     .problem("The citation file must declare `title`")
//!     .add_detail("`title` is missing")
//!     .add_hint("Add a `title:` entry to CITATION.cff?")
//!     .build();
//!
//! assert!(error.to_text().contains("✖ `title` is missing"));
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_docs_url, get_error_info};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticMessage, MessageContent};
