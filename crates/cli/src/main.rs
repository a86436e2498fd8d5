mod cli;
mod config;
mod error;
mod generate;
mod pivot;
mod request;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Cli;
use crate::cli::Commands;
use crate::config::Config;
use crate::config::DEFAULT_LOG_FILTER;
use crate::error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref());

    init_tracing(config.as_ref().ok());

    match config.and_then(|config| run(cli.command, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &Config) -> Result<(), CliError> {
    match command {
        Commands::Generate(args) => generate::generate(args, config),
        Commands::Pivot(args) => pivot::pivot(args, config),
    }
}

/// Logs to stderr, filtered by `RUST_LOG` or else the configured filter.
fn init_tracing(config: Option<&Config>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.map_or(DEFAULT_LOG_FILTER, Config::log_filter)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
