use std::collections::BTreeMap;

use tornado_analyze::DataSet;
use tornado_analyze::DimensionCollection;
use tornado_analyze::DimensionKey;
use tornado_analyze::Measure;
use tornado_analyze::NestedValue;
use tracing::debug;
use tracing::trace;

use crate::baseline;
use crate::chart::Chart;
use crate::chart::ChartData;
use crate::chart::ChartType;
use crate::chart::Entry;
use crate::chart::TornadoSeries;
use crate::chart::meta::EntryMeta;
use crate::error::Result;
use crate::generator::Generator;
use crate::generator::check_dimensions;
use crate::generator::comparison_data;
use crate::generator::secondary_simple;
use crate::generator::top_level_keys;
use crate::generator::value_or_zero;
use crate::mode::ComparisonMode;
use crate::name::DimensionNames;
use crate::name::NameGenerator;

/// Bars drawn per measure; keys past the first two are not shown.
pub const MAX_BARS: usize = 2;

/// Generates tornado charts for one to three dimensions.
///
/// With three dimensions the collection is read last-first: the last
/// dimension splits the data into one chart per value, the remaining two
/// form the bars and their entries.
#[derive(Debug, Clone)]
pub struct Tornado<N = DimensionNames> {
    names: N,
}

impl<N: NameGenerator> Tornado<N> {
    pub fn new(names: N) -> Tornado<N> {
        Self { names }
    }

    fn generate_sliced(
        &self,
        dimensions: &DimensionCollection,
        primary: &DataSet,
        secondary: Option<&DataSet>,
        mode: ComparisonMode,
    ) -> Result<Vec<Chart>> {
        let reordered = dimensions.last_first();
        let data = primary.pivot(dimensions, true)?.simple();
        let secondary = secondary
            .map(|secondary| secondary_simple(secondary, dimensions, true))
            .transpose()?;

        let charts = top_level_keys(&data)
            .into_iter()
            .map(|slice_key| {
                trace!(%slice_key, "generating tornado slice");

                let series = data
                    .iter()
                    .filter_map(|(measure, value)| {
                        let value = value.get(slice_key)?;
                        let comparison = secondary.as_ref().and_then(|(simple, sliced)| {
                            let comparison = simple.get(measure)?;
                            if *sliced {
                                comparison.get(slice_key)
                            } else {
                                Some(comparison)
                            }
                        });
                        let rescaled = match (mode, comparison) {
                            (ComparisonMode::Baseline, Some(comparison)) => {
                                Some(baseline::rescale(value, comparison))
                            }
                            _ => None,
                        };

                        let series = generate_measure_tornado(
                            value,
                            rescaled.as_ref().or(comparison),
                            mode,
                            std::slice::from_ref(slice_key),
                            &reordered,
                        );
                        Some((*measure, series))
                    })
                    .collect();

                let mut chart = Chart::new(ChartData::Tornado(series));
                let name = self.names.generate(&chart, &reordered, Some(slice_key));
                chart.set_name(name);
                chart
            })
            .collect();

        Ok(charts)
    }
}

impl Default for Tornado<DimensionNames> {
    fn default() -> Self {
        Self::new(DimensionNames)
    }
}

impl<N: NameGenerator> Generator for Tornado<N> {
    fn chart_type(&self) -> ChartType {
        ChartType::Tornado
    }

    fn generate(
        &self,
        dimensions: &DimensionCollection,
        primary: &DataSet,
        secondary: Option<&DataSet>,
        mode: ComparisonMode,
    ) -> Result<Vec<Chart>> {
        check_dimensions(ChartType::Tornado, dimensions)?;

        debug!(
            dimensions = dimensions.len(),
            comparison = secondary.is_some(),
            %mode,
            "generating tornado"
        );

        if dimensions.len() == 3 {
            return self.generate_sliced(dimensions, primary, secondary, mode);
        }

        let data = primary.pivot(dimensions, false)?.simple();
        let comparison = comparison_data(&data, secondary, dimensions, mode)?;

        let series: BTreeMap<Measure, TornadoSeries> = data
            .iter()
            .map(|(measure, value)| {
                let series =
                    generate_measure_tornado(value, comparison.get(measure), mode, &[], dimensions);
                (*measure, series)
            })
            .collect();

        let mut chart = Chart::new(ChartData::Tornado(series));
        let name = self.names.generate(&chart, dimensions, None);
        chart.set_name(name);

        Ok(vec![chart])
    }
}

/// Builds the bars of one measure from the first [`MAX_BARS`] keys of `value`.
///
/// A scalar bar holds a single entry. A nested bar holds one entry per
/// sub-key, ordered by label.
pub fn generate_measure_tornado(
    value: &NestedValue,
    comparison: Option<&NestedValue>,
    mode: ComparisonMode,
    prefix: &[DimensionKey],
    dimensions: &DimensionCollection,
) -> TornadoSeries {
    let Some(bars) = value.as_branch() else {
        return TornadoSeries::new();
    };

    bars.iter()
        .take(MAX_BARS)
        .map(|(key, value)| {
            let comparison = comparison.and_then(|c| c.get(key));
            let mut path = prefix.to_vec();
            path.push(key.clone());

            let entries = match value.as_branch() {
                None => vec![Entry::new(
                    key.strip(),
                    value.total(),
                    value_or_zero(comparison),
                    EntryMeta::new(mode, &path, dimensions),
                )],
                Some(children) => {
                    let mut entries = children
                        .iter()
                        .map(|(sub_key, value)| {
                            path.push(sub_key.clone());
                            let entry = Entry::new(
                                sub_key.strip(),
                                value.total(),
                                value_or_zero(comparison.and_then(|c| c.get(sub_key))),
                                EntryMeta::new(mode, &path, dimensions),
                            );
                            path.pop();
                            entry
                        })
                        .collect::<Vec<Entry>>();
                    entries.sort_by(|a, b| a.label().cmp(b.label()));
                    entries
                }
            };

            (key.strip().to_owned(), entries)
        })
        .collect()
}
