use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tornado_chart::Chart;
use tornado_chart::ChartType;
use tornado_chart::ComparisonMode;
use tornado_chart::generator_for;
use tracing::info;

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::request::ChartRequest;

pub(crate) fn generate(args: GenerateArgs, config: &Config) -> Result<(), CliError> {
    let request = ChartRequest::read(&args.input)?;

    let chart_type = args
        .chart
        .map(ChartType::from)
        .or(request.chart_type)
        .ok_or(CliError::MissingChartType)?;
    let mode = args
        .mode
        .map(ComparisonMode::from)
        .or(request.mode)
        .or(config.mode)
        .unwrap_or_default();

    info!(
        input = %args.input.display(),
        %chart_type,
        %mode,
        "generating charts"
    );

    let charts = charts(&request, chart_type, mode)?;
    info!(charts = charts.len(), "generated charts");

    let json = to_json(&charts, args.pretty || config.pretty)?;
    write_output(args.output.as_deref(), &json)
}

pub(crate) fn charts(
    request: &ChartRequest,
    chart_type: ChartType,
    mode: ComparisonMode,
) -> Result<Vec<Chart>, CliError> {
    let primary = request.primary()?;
    let secondary = request.secondary()?;

    let charts = generator_for(chart_type).generate(
        &request.dimensions,
        &primary,
        secondary.as_ref(),
        mode,
    )?;

    Ok(charts)
}

pub(crate) fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    json.map_err(CliError::Encode)
}

/// Writes `content` to the file at `path`, or to the standard output.
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, content).map_err(CliError::Write),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{content}").map_err(CliError::Write)
        }
    }
}
