/*
 * extract.rs
 * Copyright (c) 2025 cff2coins contributors
 *
 * Extract command implementation
 */

//! `cff2coins extract`: COinS markup to a JSON list of result trees.

use anyhow::Result;
use cff2coins::{CffCoinSpan, MarkupBackend};
use std::path::PathBuf;
use tracing::debug;

/// Arguments for the extract command
#[derive(Debug)]
pub struct ExtractArgs {
    pub html: PathBuf,
    pub encoding: String,
    pub backend: MarkupBackend,
    pub compact: bool,
}

/// Execute the extract command
pub fn execute(args: ExtractArgs) -> Result<()> {
    let results = CffCoinSpan::from_html_file(&args.html, Some(&args.encoding), args.backend)?;
    debug!(count = results.len(), backend = %args.backend, "extracted results");

    let json = cff2coins::to_json_list_string(&results, !args.compact)?;
    super::write_output(None, &json)
}
