use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tornado_analyze::DataSet;
use tornado_analyze::DimensionCollection;
use tornado_analyze::Measure;
use tornado_analyze::NestedValue;
use tornado_analyze::error::AnalyzeError;
use tornado_chart::ChartType;
use tornado_chart::ComparisonMode;

use crate::error::CliError;

/// A chart request as handed over by the analysis step.
///
/// ```json
/// {
///   "chart_type": "histogram",
///   "mode": "compare",
///   "dimensions": [{ "target": "fb.author.gender", "label": "Gender" }],
///   "primary": { "interactions": { "fb.author.gender:female": 10 } },
///   "secondary": { "interactions": { "fb.author.gender:female": 7 } }
/// }
/// ```
///
/// The secondary data set is grouped by `secondary_dimensions` if given,
/// otherwise by the same dimensions as the primary one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ChartRequest {
    #[serde(default)]
    pub(crate) chart_type: Option<ChartType>,
    #[serde(default)]
    pub(crate) mode: Option<ComparisonMode>,
    pub(crate) dimensions: DimensionCollection,
    pub(crate) primary: BTreeMap<Measure, NestedValue>,
    #[serde(default)]
    pub(crate) secondary: Option<BTreeMap<Measure, NestedValue>>,
    #[serde(default)]
    pub(crate) secondary_dimensions: Option<DimensionCollection>,
}

impl ChartRequest {
    pub(crate) fn read(path: &Path) -> Result<ChartRequest, CliError> {
        let content = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| CliError::Request {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn primary(&self) -> Result<DataSet, AnalyzeError> {
        DataSet::new(self.dimensions.clone(), self.primary.clone())
    }

    pub(crate) fn secondary(&self) -> Result<Option<DataSet>, AnalyzeError> {
        let Some(data) = &self.secondary else {
            return Ok(None);
        };

        let dimensions = self
            .secondary_dimensions
            .as_ref()
            .unwrap_or(&self.dimensions)
            .clone();

        DataSet::new(dimensions, data.clone()).map(Some)
    }
}
