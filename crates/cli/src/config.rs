//! Configuration file loading.
//!
//! The configuration file is resolved in the following order:
//! 1. the `--config` command line argument
//! 2. the `TORNADO_CONFIG` environment variable
//! 3. `tornado.toml` in the current working directory
//!
//! Without any file the defaults apply. Command line flags override the
//! values read from the file.

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tornado_chart::ComparisonMode;

use crate::error::CliError;

pub(crate) const CONFIG_ENV: &str = "TORNADO_CONFIG";
pub(crate) const DEFAULT_CONFIG_FILE: &str = "tornado.toml";
pub(crate) const DEFAULT_LOG_FILTER: &str = "tornado=info";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// A `tracing` filter directive, e.g. `tornado=debug`.
    pub(crate) log_filter: Option<String>,
    pub(crate) mode: Option<ComparisonMode>,
    pub(crate) pretty: bool,
}

impl Config {
    pub(crate) fn resolve(arg: Option<&Path>) -> Result<Config, CliError> {
        let env_path = env::var_os(CONFIG_ENV).map(PathBuf::from);

        match config_path(arg, env_path, Path::new(DEFAULT_CONFIG_FILE)) {
            Some(path) => Config::load(&path),
            None => Ok(Config::default()),
        }
    }

    pub(crate) fn load(path: &Path) -> Result<Config, CliError> {
        let content = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

fn config_path(arg: Option<&Path>, env_path: Option<PathBuf>, default: &Path) -> Option<PathBuf> {
    arg.map(Path::to_path_buf)
        .or(env_path)
        .or_else(|| default.is_file().then(|| default.to_path_buf()))
}
