/*
 * render.rs
 * Copyright (c) 2025 cff2coins contributors
 *
 * Render command implementation
 */

//! `cff2coins render`: persisted result tree to COinS markup.

use anyhow::{Context, Result};
use cff2coins::CffCoinSpan;
use std::fs;
use std::path::PathBuf;

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    pub json: PathBuf,
    pub output: Option<PathBuf>,
    pub with_references: bool,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let content = fs::read_to_string(&args.json)
        .with_context(|| format!("Failed to read JSON file: {}", args.json.display()))?;
    let result = CffCoinSpan::from_json_str(&content)?;
    let html = result.to_html_string(args.with_references)?;
    super::write_output(args.output.as_deref(), &html)
}
