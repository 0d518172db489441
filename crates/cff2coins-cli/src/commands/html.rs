/*
 * html.rs
 * Copyright (c) 2025 cff2coins contributors
 *
 * HTML command implementation
 */

//! `cff2coins html`: CITATION.cff to COinS markup.

use anyhow::Result;
use cff2coins::CffCoinSpan;
use std::path::PathBuf;
use tracing::info;

use crate::OverrideArgs;
use crate::config::resolve_options;

/// Arguments for the html command
#[derive(Debug)]
pub struct HtmlArgs {
    /// CFF file, `CITATION.cff` when absent
    pub cff: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub with_references: bool,
    pub overrides: OverrideArgs,
}

/// Execute the html command
pub fn execute(args: HtmlArgs) -> Result<()> {
    let options = resolve_options(&args.overrides)?;
    let result = CffCoinSpan::from_cff_file(args.cff.as_deref(), &options)?;

    match &args.output {
        Some(path) => {
            result.to_html_file(path, args.with_references)?;
            info!(output = %path.display(), "wrote COinS markup");
            Ok(())
        }
        None => {
            let html = result.to_html_string(args.with_references)?;
            super::write_output(None, &html)
        }
    }
}
