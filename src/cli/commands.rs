//! CLI commands and argument parsing

use crate::config::SampleOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Field presence and type summaries for JSON records
#[derive(Parser, Debug)]
#[command(name = "field-presence")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarise the fields of a JSON document
    ///
    /// The document may be an array of records, an object with an array under
    /// "data" or "records", or a single record object.
    Infer {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "tsv")]
        format: OutputFormat,
    },

    /// Fetch a record sample from the Data API and summarise it
    Sample {
        #[command(flatten)]
        options: SampleOptions,

        /// Write the raw response JSON to a file
        #[arg(long)]
        raw_out: Option<PathBuf>,

        /// Write the summary JSON to a file
        #[arg(long)]
        summary_out: Option<PathBuf>,
    },
}

/// Output format for `infer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated rows with a header
    Tsv,
    /// Pretty-printed JSON array of rows
    Json,
}
