//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{EnvSource, SampleOptions};
use crate::decode::parse_payload;
use crate::engine::{analyze, Sampler};
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::output::{write_json, write_json_file, write_tsv};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer { input, format } => self.infer(input.as_deref(), *format),
            Commands::Sample {
                options,
                raw_out,
                summary_out,
            } => {
                self.sample(options, raw_out.as_ref(), summary_out.as_ref())
                    .await
            }
        }
    }

    /// Summarise a JSON document from a file or stdin
    fn infer(&self, input: Option<&Path>, format: OutputFormat) -> Result<()> {
        let raw = read_input(input)?;
        let payload = parse_payload(&raw, "Input")?;
        let rows = analyze(payload)?;

        let stdout = io::stdout();
        let out = stdout.lock();
        let written = match format {
            OutputFormat::Tsv => write_tsv(out, &rows),
            OutputFormat::Json => write_json(out, &rows),
        };
        written.context("Failed to write output")
    }

    /// Fetch a sample and print its report
    async fn sample(
        &self,
        options: &SampleOptions,
        raw_out: Option<&PathBuf>,
        summary_out: Option<&PathBuf>,
    ) -> Result<()> {
        let app_root = options.app_root()?;
        let env = EnvSource::load(&app_root)?;
        let request = options.resolve(&env)?;
        debug!("Resolved request: {request:?}");

        let sampler = Sampler::new(HttpClient::new()?);
        let outcome = sampler.run(&request).await?;

        if let Some(path) = raw_out {
            write_json_file(path, &outcome.payload)?;
        }
        if let Some(path) = summary_out {
            write_json_file(path, &outcome.report)?;
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_json(&mut out, &outcome.report).context("Failed to write output")?;
        out.flush()?;
        Ok(())
    }
}

/// Read the whole input from a file, or from stdin when no path is given
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path).map_err(Error::ReadInput),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(Error::ReadInput)?;
            Ok(buf)
        }
    }
}
