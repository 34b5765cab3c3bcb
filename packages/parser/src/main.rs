//! CLI entry point for the parser.

use clap::Parser;
use pydocs_parser::cli::{self, Cli};
use pydocs_parser::{logging, Config};

fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = cli::run(&cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
