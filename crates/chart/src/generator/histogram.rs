use std::slice;

use tornado_analyze::DataSet;
use tornado_analyze::DimensionCollection;
use tornado_analyze::DimensionKey;
use tornado_analyze::NestedValue;
use tracing::debug;
use tracing::trace;

use crate::chart::Chart;
use crate::chart::ChartData;
use crate::chart::ChartType;
use crate::chart::Entry;
use crate::chart::meta::EntryMeta;
use crate::error::Result;
use crate::generator::Generator;
use crate::generator::check_dimensions;
use crate::generator::comparison_data;
use crate::generator::top_level_keys;
use crate::generator::value_or_zero;
use crate::mode::ComparisonMode;
use crate::name::DimensionNames;
use crate::name::NameGenerator;

/// Generates histograms for one or two dimensions.
///
/// With one dimension a single chart holds one series per measure. With two
/// dimensions there is one chart per value of the first dimension.
#[derive(Debug, Clone)]
pub struct Histogram<N = DimensionNames> {
    names: N,
}

impl<N: NameGenerator> Histogram<N> {
    pub fn new(names: N) -> Histogram<N> {
        Self { names }
    }
}

impl Default for Histogram<DimensionNames> {
    fn default() -> Self {
        Self::new(DimensionNames)
    }
}

impl<N: NameGenerator> Generator for Histogram<N> {
    fn chart_type(&self) -> ChartType {
        ChartType::Histogram
    }

    fn generate(
        &self,
        dimensions: &DimensionCollection,
        primary: &DataSet,
        secondary: Option<&DataSet>,
        mode: ComparisonMode,
    ) -> Result<Vec<Chart>> {
        check_dimensions(ChartType::Histogram, dimensions)?;

        debug!(
            dimensions = dimensions.len(),
            comparison = secondary.is_some(),
            %mode,
            "generating histogram"
        );

        let data = primary.pivot(dimensions, false)?.simple();
        let comparison = comparison_data(&data, secondary, dimensions, mode)?;

        if dimensions.len() == 1 {
            let series = data
                .iter()
                .map(|(measure, value)| {
                    let entries = measure_series(
                        value,
                        comparison.get(measure),
                        mode,
                        &[],
                        dimensions,
                    );
                    (*measure, entries)
                })
                .collect();

            let mut chart = Chart::new(ChartData::Histogram(series));
            let name = self.names.generate(&chart, dimensions, None);
            chart.set_name(name);

            return Ok(vec![chart]);
        }

        let charts = top_level_keys(&data)
            .into_iter()
            .map(|slice_key| {
                trace!(%slice_key, "generating histogram slice");

                let series = data
                    .iter()
                    .map(|(measure, value)| {
                        let comparison = comparison.get(measure).and_then(|c| c.get(slice_key));
                        let entries = value
                            .get(slice_key)
                            .map(|value| {
                                measure_series(
                                    value,
                                    comparison,
                                    mode,
                                    slice::from_ref(slice_key),
                                    dimensions,
                                )
                            })
                            .unwrap_or_default();
                        (*measure, entries)
                    })
                    .collect();

                let mut chart = Chart::new(ChartData::Histogram(series));
                let name = self.names.generate(&chart, dimensions, Some(slice_key));
                chart.set_name(name);
                chart
            })
            .collect();

        Ok(charts)
    }
}

/// One entry per child of `value`, in ascending raw key order.
fn measure_series(
    value: &NestedValue,
    comparison: Option<&NestedValue>,
    mode: ComparisonMode,
    prefix: &[DimensionKey],
    dimensions: &DimensionCollection,
) -> Vec<Entry> {
    let Some(children) = value.as_branch() else {
        return Vec::new();
    };

    children
        .iter()
        .map(|(key, value)| {
            let path = [prefix, slice::from_ref(key)].concat();
            let comparison = value_or_zero(comparison.and_then(|c| c.get(key)));

            Entry::new(
                key.strip(),
                value.total(),
                comparison,
                EntryMeta::new(mode, &path, dimensions),
            )
        })
        .collect::<Vec<Entry>>()
}
