use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Rebuild tables from the text layer of PDF pages.
///
/// Input is a JSON dump of PDF.js `getTextContent()` output per page.
#[derive(Debug, Parser)]
#[command(name = "glyphgrid", about, version)]
pub struct Cli {
    /// Log pipeline progress to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconstruct tables from each page
    Tables {
        /// Path to the text-layer dump (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Pipeline settings file (JSON); missing fields use defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Remove headers and footers repeated across pages
        #[arg(long)]
        cross_page_furniture: bool,
    },

    /// List collected glyphs after header/footer suppression
    Glyphs {
        /// Path to the text-layer dump (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Pipeline settings file (JSON); missing fields use defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show row clusters and column boundaries
    Rows {
        /// Path to the text-layer dump (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Pipeline settings file (JSON); missing fields use defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
    /// Comma-separated values
    Csv,
}
