use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tornado_analyze::error::AnalyzeError;
use tornado_chart::error::ChartError;

#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error("CLI error: could not read `{}`: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("CLI error: could not write the output: {0}")]
    Write(#[source] io::Error),

    #[error("CLI error: invalid configuration in `{}`: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("CLI error: invalid chart request in `{}`: {source}", .path.display())]
    Request {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("CLI error: the chart type is neither given nor part of the request")]
    MissingChartType,

    #[error("CLI error: could not encode the output: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("CLI error: {0}")]
    Analyze(#[from] AnalyzeError),

    #[error("CLI error: {0}")]
    Chart(#[from] ChartError),
}
