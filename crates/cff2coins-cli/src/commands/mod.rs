//! Command implementations for the cff2coins CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! cff2coins library for the actual conversion.

pub mod extract;
pub mod html;
pub mod json;
pub mod render;

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write `content` to `output`, or to stdout when no path is given.
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", content).context("Failed to write to stdout")
        }
    }
}
