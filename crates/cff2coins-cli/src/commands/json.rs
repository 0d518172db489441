/*
 * json.rs
 * Copyright (c) 2025 cff2coins contributors
 *
 * JSON command implementation
 */

//! `cff2coins json`: CITATION.cff to a persisted result tree.

use anyhow::Result;
use cff2coins::CffCoinSpan;
use std::path::PathBuf;

use crate::OverrideArgs;
use crate::config::resolve_options;

/// Arguments for the json command
#[derive(Debug)]
pub struct JsonArgs {
    pub cff: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub overrides: OverrideArgs,
}

/// Execute the json command
pub fn execute(args: JsonArgs) -> Result<()> {
    let options = resolve_options(&args.overrides)?;
    let result = CffCoinSpan::from_cff_file(args.cff.as_deref(), &options)?;
    let json = result.to_json_string(!args.compact)?;
    super::write_output(args.output.as_deref(), &json)
}
