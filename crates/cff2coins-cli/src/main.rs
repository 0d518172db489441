//! cff2coins CLI - Main entry point

use anyhow::Result;
use cff2coins::MarkupBackend;
use cff2coins_error_reporting::DiagnosticMessage;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "cff2coins")]
#[command(version)]
#[command(about = "Convert CITATION.cff files into COinS markup", long_about = None)]
struct Cli {
    /// Show debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CFF file into COinS spans
    Html {
        /// CFF file to read (defaults to CITATION.cff)
        cff: Option<PathBuf>,

        /// Write markup to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also emit one span per reference
        #[arg(long)]
        with_references: bool,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Convert a CFF file into a JSON result tree
    Json {
        /// CFF file to read (defaults to CITATION.cff)
        cff: Option<PathBuf>,

        /// Write JSON to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Extract software and dataset spans from an HTML file
    Extract {
        /// HTML file to read
        html: PathBuf,

        /// Character encoding of the HTML file
        #[arg(long, default_value = cff2coins::DEFAULT_HTML_ENCODING)]
        encoding: String,

        /// Markup backend (html5ever, html.parser, scan)
        #[arg(long, default_value = "html5ever")]
        backend: MarkupBackend,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render a JSON result tree as COinS markup
    Render {
        /// JSON result tree produced by `cff2coins json`
        json: PathBuf,

        /// Write markup to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also emit one span per reference
        #[arg(long)]
        with_references: bool,
    },
}

/// Overrides shared by the commands that compile CFF.
#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    /// Publisher written into the primary span
    #[arg(long)]
    pub publisher: Option<String>,

    /// Language written into the primary span
    #[arg(long)]
    pub language: Option<String>,

    /// Referrer id of the form <authority>:<id>
    #[arg(long)]
    pub referrer_id: Option<String>,

    /// YAML file with publisher, language and referrer-id defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        match e.downcast_ref::<cff2coins::Error>() {
            Some(error) => display_diagnostic(&error.to_diagnostic()),
            None => eprintln!("Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Html {
            cff,
            output,
            with_references,
            overrides,
        } => commands::html::execute(commands::html::HtmlArgs {
            cff,
            output,
            with_references,
            overrides,
        }),
        Commands::Json {
            cff,
            output,
            compact,
            overrides,
        } => commands::json::execute(commands::json::JsonArgs {
            cff,
            output,
            compact,
            overrides,
        }),
        Commands::Extract {
            html,
            encoding,
            backend,
            compact,
        } => commands::extract::execute(commands::extract::ExtractArgs {
            html,
            encoding,
            backend,
            compact,
        }),
        Commands::Render {
            json,
            output,
            with_references,
        } => commands::render::execute(commands::render::RenderArgs {
            json,
            output,
            with_references,
        }),
    }
}

/// Display a diagnostic message in tidyverse style.
fn display_diagnostic(diagnostic: &DiagnosticMessage) {
    eprintln!("{}", diagnostic.to_text());
    if let Some(url) = diagnostic.docs_url() {
        eprintln!("See {} for more information", url);
    }
}
