use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use tornado_chart::ChartType;
use tornado_chart::ComparisonMode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Specify the path of a TOML configuration file.
    ///
    /// If it is not specified, the `TORNADO_CONFIG` environment variable is
    /// read, then `tornado.toml` in the current working directory.
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate chart data from a chart request.
    Generate(GenerateArgs),
    /// Pivot the primary data set of a chart request and print its nested form.
    Pivot(PivotArgs),
}

#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Specify the path of the JSON chart request.
    #[arg(short, long, value_parser(parse_file))]
    pub(crate) input: PathBuf,

    /// Specify the chart type. Overrides the chart type of the request.
    #[arg(short = 't', long, value_enum)]
    pub(crate) chart: Option<ChartKind>,

    /// Specify how the secondary data set is compared with the primary one.
    /// Overrides the mode of the request and the configuration.
    #[arg(short, long, value_enum)]
    pub(crate) mode: Option<Mode>,

    /// Specify the path where the charts will be written.
    /// If the output path is not specified then the charts are
    /// written to the standard output.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Pretty print the JSON output.
    #[arg(short, long)]
    pub(crate) pretty: bool,
}

#[derive(Args)]
pub(crate) struct PivotArgs {
    /// Specify the path of the JSON chart request.
    #[arg(short, long, value_parser(parse_file))]
    pub(crate) input: PathBuf,

    /// Nest the dimensions in the reverse of the target order.
    #[arg(long)]
    pub(crate) invert: bool,

    /// Specify the target order of the dimensions, outermost first.
    /// Defaults to the order of the request.
    #[arg(long, num_args = 1..)]
    pub(crate) order: Vec<String>,

    /// Pretty print the JSON output.
    #[arg(short, long)]
    pub(crate) pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ChartKind {
    Tornado,
    Histogram,
    TimeSeries,
}

impl From<ChartKind> for ChartType {
    fn from(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Tornado => ChartType::Tornado,
            ChartKind::Histogram => ChartType::Histogram,
            ChartKind::TimeSeries => ChartType::TimeSeries,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    Compare,
    Baseline,
}

impl From<Mode> for ComparisonMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Compare => ComparisonMode::Compare,
            Mode::Baseline => ComparisonMode::Baseline,
        }
    }
}

fn parse_file(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_file() {
        return Err(format!("The `{}` path must point to a file.", path.display()));
    }

    Ok(path)
}
