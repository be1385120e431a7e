//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate Markdown API docs from Python docstrings and type hints
#[derive(Parser, Debug)]
#[command(name = "pydocmd")]
#[command(about = "Generate Markdown API docs from Python docstrings and type hints")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract docstrings and type hints from a source tree
    Extract {
        /// Root directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file [default: documentation.md]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (markdown, json)
        #[arg(long)]
        format: Option<String>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Glob patterns to exclude, relative to PATH (can be repeated)
        #[arg(long)]
        exclude: Vec<String>,

        /// Source file extension [default: py]
        #[arg(long)]
        extension: Option<String>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert a Jupyter notebook to MDX
    Convert {
        /// Notebook to convert
        input: PathBuf,

        /// Output file [default: INPUT with an .mdx extension]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}
