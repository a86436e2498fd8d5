pub mod histogram;
pub mod time_series;
pub mod tornado;

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use tornado_analyze::DataSet;
use tornado_analyze::DimensionCollection;
use tornado_analyze::DimensionKey;
use tornado_analyze::Measure;
use tornado_analyze::NestedValue;
use tracing::warn;

use crate::baseline;
use crate::chart::Chart;
use crate::chart::ChartType;
use crate::error::ChartError;
use crate::error::Result;
use crate::generator::histogram::Histogram;
use crate::generator::time_series::TimeSeries;
use crate::generator::tornado::Tornado;
use crate::mode::ComparisonMode;

/// Turns data sets into charts of one type.
pub trait Generator {
    fn chart_type(&self) -> ChartType;

    /// Generates the charts for `primary`, optionally compared against `secondary`.
    ///
    /// Fails with [`ChartError::IncompatibleDimensions`] if the chart type cannot
    /// be drawn for the number of `dimensions`. Absent secondary data or keys
    /// yield zero comparison values.
    fn generate(
        &self,
        dimensions: &DimensionCollection,
        primary: &DataSet,
        secondary: Option<&DataSet>,
        mode: ComparisonMode,
    ) -> Result<Vec<Chart>>;
}

/// Returns a generator of the given type that names charts after their dimensions.
pub fn generator_for(chart_type: ChartType) -> Box<dyn Generator> {
    match chart_type {
        ChartType::Tornado => Box::new(Tornado::default()),
        ChartType::Histogram => Box::new(Histogram::default()),
        ChartType::TimeSeries => Box::new(TimeSeries),
    }
}

pub(crate) fn check_dimensions(
    chart_type: ChartType,
    dimensions: &DimensionCollection,
) -> Result<()> {
    let supported = chart_type.supported_dimensions();

    if supported.contains(&dimensions.len()) {
        Ok(())
    } else {
        Err(ChartError::IncompatibleDimensions {
            chart_type,
            min: *supported.start(),
            max: *supported.end(),
            actual: dimensions.len(),
        })
    }
}

/// Flattens the secondary data set in the same nesting as the primary.
///
/// A secondary grouped by the same dimensions is pivoted like the primary;
/// any other secondary is used as it is, so lookups by primary keys may miss.
pub(crate) fn secondary_simple(
    secondary: &DataSet,
    dimensions: &DimensionCollection,
    invert: bool,
) -> Result<(BTreeMap<Measure, NestedValue>, bool)> {
    if secondary.dimensions().same_dimensions(dimensions) {
        let simple = secondary.pivot(dimensions, invert)?.simple();
        Ok((simple, true))
    } else {
        warn!(
            expected = dimensions.len(),
            actual = secondary.dimensions().len(),
            "secondary data set is grouped by other dimensions, using it as is"
        );
        Ok((secondary.simple(), false))
    }
}

/// Prepares comparison values for the flattened primary data.
///
/// Empty without a secondary data set; rescaled per measure in baseline mode.
pub(crate) fn comparison_data(
    data: &BTreeMap<Measure, NestedValue>,
    secondary: Option<&DataSet>,
    dimensions: &DimensionCollection,
    mode: ComparisonMode,
) -> Result<BTreeMap<Measure, NestedValue>> {
    let Some(secondary) = secondary else {
        return Ok(BTreeMap::new());
    };

    let (simple, _) = secondary_simple(secondary, dimensions, false)?;

    Ok(match mode {
        ComparisonMode::Compare => simple,
        ComparisonMode::Baseline => baseline::rescale_all(data, &simple),
    })
}

/// Distinct top-level keys across all measures, in ascending order.
pub(crate) fn top_level_keys(data: &BTreeMap<Measure, NestedValue>) -> BTreeSet<&DimensionKey> {
    data.values()
        .filter_map(NestedValue::as_branch)
        .flat_map(|children| children.keys())
        .collect()
}

/// The value used for a possibly absent entry.
#[inline]
pub(crate) fn value_or_zero(value: Option<&NestedValue>) -> f64 {
    value.map_or(0.0, NestedValue::total)
}
