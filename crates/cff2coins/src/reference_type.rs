//! The CFF reference-type table.
//!
//! Maps each CFF `type` tag a reference or preferred citation may carry to
//! the OpenURL metadata format, genre and Dublin Core type used in its span.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// An OpenURL KEV metadata format (`rft_val_fmt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataFormat {
    Journal,
    Book,
    Dissertation,
    Patent,
    /// Dublin Core, used for anything without a richer format.
    Dc,
    ComputerProgram,
    Data,
}

impl MetadataFormat {
    pub fn uri(self) -> &'static str {
        match self {
            MetadataFormat::Journal => "info:ofi/fmt:kev:mtx:journal",
            MetadataFormat::Book => "info:ofi/fmt:kev:mtx:book",
            MetadataFormat::Dissertation => "info:ofi/fmt:kev:mtx:dissertation",
            MetadataFormat::Patent => "info:ofi/fmt:kev:mtx:patent",
            MetadataFormat::Dc => "info:ofi/fmt:kev:mtx:dc",
            MetadataFormat::ComputerProgram => "info:ofi/fmt:kev:mtx:computerProgram",
            MetadataFormat::Data => "info:ofi/fmt:kev:mtx:data",
        }
    }
}

impl fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

/// How one reference type is expressed in a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceType {
    pub format: MetadataFormat,
    /// `rft.genre` value, for formats that define genres.
    pub genre: Option<&'static str>,
    /// Coarse Dublin Core type, emitted as `rft.type`.
    pub dc_type: &'static str,
}

const fn entry(
    format: MetadataFormat,
    genre: Option<&'static str>,
    dc_type: &'static str,
) -> ReferenceType {
    ReferenceType {
        format,
        genre,
        dc_type,
    }
}

use MetadataFormat::{Book, ComputerProgram, Dc, Dissertation, Journal, Patent};

const REFERENCE_TYPE_TABLE: &[(&str, ReferenceType)] = &[
    ("art", entry(Dc, None, "Image")),
    ("article", entry(Journal, Some("article"), "Text")),
    ("audiovisual", entry(Dc, None, "MovingImage")),
    ("bill", entry(Dc, None, "Text")),
    ("blog", entry(Dc, None, "Text")),
    ("book", entry(Book, Some("book"), "Text")),
    ("bookitem", entry(Book, Some("bookitem"), "Text")),
    ("catalogue", entry(Book, Some("document"), "Text")),
    ("conference", entry(Book, Some("conference"), "Event")),
    ("conference-paper", entry(Journal, Some("proceeding"), "Text")),
    ("data", entry(Dc, None, "Dataset")),
    ("database", entry(Dc, None, "Dataset")),
    ("dictionary", entry(Book, Some("book"), "Text")),
    ("dissertation", entry(Dissertation, None, "Text")),
    ("edited-work", entry(Book, Some("book"), "Text")),
    ("encyclopedia", entry(Book, Some("book"), "Text")),
    ("film-broadcast", entry(Dc, None, "MovingImage")),
    ("generic", entry(Dc, None, "Text")),
    ("government-document", entry(Book, Some("report"), "Text")),
    ("grant", entry(Dc, None, "Text")),
    ("hearing", entry(Dc, None, "Event")),
    ("historical-work", entry(Book, Some("document"), "Text")),
    ("legal-case", entry(Dc, None, "Text")),
    ("legal-rule", entry(Dc, None, "Text")),
    ("magazine-article", entry(Journal, Some("article"), "Text")),
    ("manual", entry(Book, Some("document"), "Text")),
    ("map", entry(Dc, None, "Image")),
    ("multimedia", entry(Dc, None, "InteractiveResource")),
    ("music", entry(Dc, None, "Sound")),
    ("newspaper-article", entry(Journal, Some("article"), "Text")),
    ("pamphlet", entry(Book, Some("document"), "Text")),
    ("patent", entry(Patent, None, "Text")),
    ("personal-communication", entry(Dc, None, "Text")),
    ("proceedings", entry(Book, Some("conference"), "Text")),
    ("report", entry(Book, Some("report"), "Text")),
    ("serial", entry(Journal, Some("journal"), "Text")),
    ("slides", entry(Dc, None, "Text")),
    ("software-code", entry(ComputerProgram, None, "Software")),
    ("software-container", entry(ComputerProgram, None, "Software")),
    ("software-executable", entry(ComputerProgram, None, "Software")),
    ("software-virtual-machine", entry(ComputerProgram, None, "Software")),
    ("sound-recording", entry(Dc, None, "Sound")),
    ("standard", entry(Book, Some("document"), "Text")),
    ("statute", entry(Dc, None, "Text")),
    ("thesis", entry(Dissertation, None, "Text")),
    ("unpublished", entry(Book, Some("unknown"), "Text")),
    ("video", entry(Dc, None, "MovingImage")),
    ("website", entry(Dc, None, "InteractiveResource")),
];

static REFERENCE_TYPES: Lazy<HashMap<&'static str, ReferenceType>> =
    Lazy::new(|| REFERENCE_TYPE_TABLE.iter().copied().collect());

/// Look up a CFF reference type tag.
///
/// `software` and `dataset` are not in the table; they get dedicated
/// span layouts.
pub fn lookup(tag: &str) -> Option<ReferenceType> {
    REFERENCE_TYPES.get(tag).copied()
}

/// Every tag in the table, sorted.
pub fn known_tags() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = REFERENCE_TYPES.keys().copied().collect();
    tags.sort_unstable();
    tags
}
