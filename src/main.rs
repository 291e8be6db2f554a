//! field-presence CLI
//!
//! Summarises field presence, types and nullability of JSON records

use clap::Parser;
use field_presence::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the summary
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        tracing::debug!("{:?} error: {e:?}", e.category());
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
