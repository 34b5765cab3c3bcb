//! Command-line interface for the parser.

use clap::Parser;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::Result;
use crate::http::Session;
use crate::modes::Mode;
use crate::output::{control_output, OutputMode};

/// Python documentation parser - release notes, versions, PEP statuses and
/// the PDF archive from docs.python.org.
#[derive(Debug, Parser)]
#[command(name = "pydocs-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Parser mode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the response cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Additional output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputMode>,
}

/// Execute a parsed command line against `config`.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    tracing::info!("Parser started");
    tracing::info!(?cli, "Command line arguments");

    let session = Session::new(ResponseCache::open(config.cache_dir())?)?;
    if cli.clear_cache {
        session.cache().clear()?;
    }

    let results = cli.mode.run(&session, config).inspect_err(|e| {
        tracing::error!(mode = %cli.mode, error = %e, "Parser mode failed");
    })?;

    if let Some(results) = results {
        control_output(&results, cli.output, cli.mode, config)?;
    }

    tracing::info!("Parser finished");
    Ok(())
}
