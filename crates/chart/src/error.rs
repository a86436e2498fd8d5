//! Defines the `Error` and `Result` types that this crate uses.

use thiserror::Error;
use tornado_analyze::error::AnalyzeError;

use crate::chart::ChartType;

/// The result type that uses [ChartError] as the error type.
pub type Result<T> = std::result::Result<T, ChartError>;

/// The error type for generating charts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChartError {
    /// The chart type cannot be drawn for the given number of dimensions.
    #[error(
        "chart error: incompatible dimensions: a {chart_type} chart accepts {}, got {actual}",
        accepted(.min, .max)
    )]
    IncompatibleDimensions {
        chart_type: ChartType,
        min: usize,
        max: usize,
        actual: usize,
    },

    /// An [AnalyzeError] raised while pivoting malformed input data.
    #[error("chart error: {0}")]
    Analyze(#[from] AnalyzeError),

    #[error("chart error: unknown chart type `{0}`")]
    UnknownChartType(String),

    #[error("chart error: unknown comparison mode `{0}`")]
    UnknownComparisonMode(String),
}

fn accepted(min: &usize, max: &usize) -> String {
    if min == max {
        format!("exactly {min} dimension{}", if *min == 1 { "" } else { "s" })
    } else {
        format!("{min} to {max} dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incompatible_dimensions_message() {
        let error = ChartError::IncompatibleDimensions {
            chart_type: ChartType::Histogram,
            min: 1,
            max: 2,
            actual: 3,
        };
        assert_eq!(
            error.to_string(),
            "chart error: incompatible dimensions: a histogram chart accepts 1 to 2 dimensions, got 3"
        );

        let error = ChartError::IncompatibleDimensions {
            chart_type: ChartType::TimeSeries,
            min: 1,
            max: 1,
            actual: 2,
        };
        assert_eq!(
            error.to_string(),
            "chart error: incompatible dimensions: a time-series chart accepts exactly 1 dimension, got 2"
        );
    }
}
