//! Chart display names.

use chrono::DateTime;
use tornado_analyze::Dimension;
use tornado_analyze::DimensionCollection;
use tornado_analyze::DimensionKey;

use crate::chart::Chart;

const DIMENSION_SEPARATOR: &str = " vs ";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Produces the display name of a generated chart.
///
/// `slice` is the key a chart was split off by, for generators that emit
/// one chart per value of a dimension.
pub trait NameGenerator {
    fn generate(
        &self,
        chart: &Chart,
        dimensions: &DimensionCollection,
        slice: Option<&DimensionKey>,
    ) -> String;
}

impl<F> NameGenerator for F
where
    F: Fn(&Chart, &DimensionCollection, Option<&DimensionKey>) -> String,
{
    fn generate(
        &self,
        chart: &Chart,
        dimensions: &DimensionCollection,
        slice: Option<&DimensionKey>,
    ) -> String {
        self(chart, dimensions, slice)
    }
}

/// Names a chart after its dimensions, e.g. `Gender vs Age (female)`.
///
/// Slice values of a time dimension holding unix seconds are printed as UTC
/// dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionNames;

impl NameGenerator for DimensionNames {
    fn generate(
        &self,
        chart: &Chart,
        dimensions: &DimensionCollection,
        slice: Option<&DimensionKey>,
    ) -> String {
        let mut name = dimensions
            .iter()
            .map(Dimension::display_name)
            .collect::<Vec<&str>>()
            .join(DIMENSION_SEPARATOR);

        if name.is_empty() {
            name.push_str(chart.chart_type().title());
        }

        if let Some(slice) = slice {
            let dimension = if slice.dimension().is_empty() {
                dimensions.first()
            } else {
                dimensions.find(slice.dimension())
            };

            let value = match dimension {
                Some(dimension) if dimension.is_time() => format_time(slice.strip()),
                _ => slice.strip().to_owned(),
            };

            name.push_str(&format!(" ({value})"));
        }

        name
    }
}

fn format_time(value: &str) -> String {
    value
        .parse::<i64>()
        .ok()
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .map(|time| time.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| value.to_owned())
}
