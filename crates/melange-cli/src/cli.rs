//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Melange: recipe-driven merging and transformation for tabular data
#[derive(Parser)]
#[command(name = "melange")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the recipe store
    #[arg(long, global = true, default_value = ".melange")]
    pub store: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a recipe to one or more data files and export the result
    Apply {
        /// Recipe id or name
        #[arg(short, long)]
        recipe: String,

        /// Input data files, in recipe order
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Read inputs as tab-separated values
        #[arg(long)]
        tsv: bool,
    },

    /// Save a recipe definition (JSON document) into the store
    Save {
        /// Path to the recipe JSON document
        #[arg(value_name = "RECIPE_FILE")]
        file: PathBuf,
    },

    /// List stored recipes
    List {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a stored recipe as JSON
    Show {
        /// Recipe id or name
        #[arg(value_name = "RECIPE")]
        recipe: String,
    },

    /// Delete a stored recipe
    Delete {
        /// Recipe id
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Output format for apply.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
    /// JSON array of objects keyed by header
    Json,
}
