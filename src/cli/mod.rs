//! CLI module
//!
//! Command-line interface over the field inference engine.
//!
//! # Commands
//!
//! - `infer` - Summarise fields of a JSON file or stdin
//! - `sample` - Fetch a sample from the Data API and summarise it

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
