use tornado_analyze::DataSet;
use tornado_analyze::DimensionCollection;
use tornado_analyze::NestedValue;
use tracing::debug;

use crate::chart::Chart;
use crate::chart::ChartData;
use crate::chart::ChartType;
use crate::chart::Point;
use crate::chart::TimeSeriesData;
use crate::error::Result;
use crate::generator::Generator;
use crate::generator::check_dimensions;
use crate::generator::comparison_data;
use crate::generator::value_or_zero;
use crate::mode::ComparisonMode;

const TIME_SERIES_NAME: &str = "Time Series";

/// Generates a single time series chart over exactly one dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeries;

impl Generator for TimeSeries {
    fn chart_type(&self) -> ChartType {
        ChartType::TimeSeries
    }

    fn generate(
        &self,
        dimensions: &DimensionCollection,
        primary: &DataSet,
        secondary: Option<&DataSet>,
        mode: ComparisonMode,
    ) -> Result<Vec<Chart>> {
        check_dimensions(ChartType::TimeSeries, dimensions)?;

        debug!(comparison = secondary.is_some(), %mode, "generating time series");

        let data = primary.pivot(dimensions, false)?.simple();
        let comparison = comparison_data(&data, secondary, dimensions, mode)?;

        let series = data
            .iter()
            .map(|(measure, value)| {
                let comparison = secondary
                    .is_some()
                    .then(|| comparison_points(value, comparison.get(measure)));

                let series = TimeSeriesData {
                    main: main_points(value),
                    comparison,
                };
                (*measure, series)
            })
            .collect();

        let mut chart = Chart::new(ChartData::TimeSeries(series));
        chart.set_name(TIME_SERIES_NAME);

        Ok(vec![chart])
    }
}

fn main_points(value: &NestedValue) -> Vec<Point> {
    value
        .as_branch()
        .into_iter()
        .flatten()
        .map(|(key, value)| Point::new(key.strip(), value.total()))
        .collect()
}

/// Comparison points aligned on the keys of `value`.
fn comparison_points(value: &NestedValue, comparison: Option<&NestedValue>) -> Vec<Point> {
    value
        .as_branch()
        .into_iter()
        .flatten()
        .map(|(key, _)| {
            let value = value_or_zero(comparison.and_then(|c| c.get(key)));
            Point::new(key.strip(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tornado_analyze::Dimension;
    use tornado_analyze::Measure;

    use super::*;
    use crate::error::ChartError;

    fn time() -> DimensionCollection {
        DimensionCollection::from_iter([Dimension::time("t").with_label("Time")])
    }

    fn data_set(dimensions: &DimensionCollection, json: &str) -> DataSet {
        let data: BTreeMap<Measure, NestedValue> = serde_json::from_str(json).unwrap();
        DataSet::new(dimensions.clone(), data).unwrap()
    }

    fn series(chart: &Chart, measure: Measure) -> &TimeSeriesData {
        match chart.data() {
            ChartData::TimeSeries(series) => &series[&measure],
            other => panic!("expected time series data, got {other:?}"),
        }
    }

    #[test]
    fn baseline_is_rescaled_to_the_primary_volume() {
        let primary = data_set(&time(), r#"{"interactions": {"t:1": 100, "t:2": 200}}"#);
        let baseline = data_set(&time(), r#"{"interactions": {"t:1": 50, "t:2": 50}}"#);

        let charts = TimeSeries
            .generate(&time(), &primary, Some(&baseline), ComparisonMode::Baseline)
            .unwrap();

        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].name(), "Time Series");
        assert_eq!(
            serde_json::to_value(series(&charts[0], Measure::Interactions)).unwrap(),
            json!({
                "main": [["1", 100], ["2", 200]],
                "comparison": [["1", 150], ["2", 150]]
            })
        );
    }

    #[test]
    fn comparison_is_aligned_on_main_keys() {
        let primary = data_set(&time(), r#"{"interactions": {"t:1": 4, "t:2": 5}}"#);
        let secondary = data_set(&time(), r#"{"interactions": {"t:2": 3, "t:3": 9}}"#);

        let charts = TimeSeries
            .generate(&time(), &primary, Some(&secondary), ComparisonMode::Compare)
            .unwrap();

        assert_eq!(
            series(&charts[0], Measure::Interactions).comparison,
            Some(vec![Point::new("1", 0.0), Point::new("2", 3.0)])
        );
    }

    #[test]
    fn no_comparison_without_secondary() {
        let primary = data_set(&time(), r#"{"unique_authors": {"t:2": 1, "t:1": 2}}"#);

        let charts = TimeSeries
            .generate(&time(), &primary, None, ComparisonMode::Baseline)
            .unwrap();

        let series = series(&charts[0], Measure::UniqueAuthors);
        assert_eq!(series.main, vec![Point::new("1", 2.0), Point::new("2", 1.0)]);
        assert_eq!(series.comparison, None);
        assert!(
            serde_json::to_value(series)
                .unwrap()
                .get("comparison")
                .is_none()
        );
    }

    #[test]
    fn two_dimensions_are_incompatible() {
        let dimensions =
            DimensionCollection::from_iter([Dimension::time("t"), Dimension::new("gender")]);
        let primary = DataSet::new(dimensions.clone(), BTreeMap::new()).unwrap();

        let result = TimeSeries.generate(&dimensions, &primary, None, ComparisonMode::Compare);

        assert_eq!(
            result,
            Err(ChartError::IncompatibleDimensions {
                chart_type: ChartType::TimeSeries,
                min: 1,
                max: 1,
                actual: 2
            })
        );
    }
}
