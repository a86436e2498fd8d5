pub mod meta;

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use tornado_analyze::Measure;

use crate::chart::meta::EntryMeta;
use crate::error::ChartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartType {
    Tornado,
    Histogram,
    TimeSeries,
}

impl ChartType {
    pub const ALL: [ChartType; 3] = [
        ChartType::Tornado,
        ChartType::Histogram,
        ChartType::TimeSeries,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Tornado => "tornado",
            ChartType::Histogram => "histogram",
            ChartType::TimeSeries => "time-series",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartType::Tornado => "Tornado",
            ChartType::Histogram => "Histogram",
            ChartType::TimeSeries => "Time Series",
        }
    }

    /// The dimension counts a chart of this type can be generated for.
    pub fn supported_dimensions(&self) -> RangeInclusive<usize> {
        match self {
            ChartType::Tornado => 1..=3,
            ChartType::Histogram => 1..=2,
            ChartType::TimeSeries => 1..=1,
        }
    }
}

impl Display for ChartType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|chart_type| chart_type.as_str() == s)
            .ok_or_else(|| ChartError::UnknownChartType(s.to_owned()))
    }
}

/// A generated chart: its type, display name and the series the client draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    #[serde(rename = "type")]
    chart_type: ChartType,
    name: String,
    data: ChartData,
}

impl Chart {
    pub fn new(data: ChartData) -> Chart {
        Self {
            chart_type: data.chart_type(),
            name: String::new(),
            data,
        }
    }

    #[inline]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn data(&self) -> &ChartData {
        &self.data
    }
}

/// Bars of a tornado chart for one measure, keyed by the stripped bar key.
pub type TornadoSeries = BTreeMap<String, Vec<Entry>>;

/// The chart data, shaped by chart type.
///
/// | type | shape |
/// |------|-------|
/// | tornado | `measure -> bar -> [entry]` |
/// | histogram | `measure -> [entry]` |
/// | time-series | `measure -> { main: [[label, value]], comparison?: [[label, value]] }` |
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartData {
    Tornado(BTreeMap<Measure, TornadoSeries>),
    Histogram(BTreeMap<Measure, Vec<Entry>>),
    TimeSeries(BTreeMap<Measure, TimeSeriesData>),
}

impl ChartData {
    pub fn chart_type(&self) -> ChartType {
        match self {
            ChartData::Tornado(_) => ChartType::Tornado,
            ChartData::Histogram(_) => ChartType::Histogram,
            ChartData::TimeSeries(_) => ChartType::TimeSeries,
        }
    }
}

/// A single bar or point: `(label, value, comparison value, metadata)`.
///
/// Serializes as a four element array, which is the shape the client expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry(
    String,
    #[serde(serialize_with = "tornado_analyze::number::serialize")] f64,
    #[serde(serialize_with = "tornado_analyze::number::serialize")] f64,
    EntryMeta,
);

impl Entry {
    pub fn new(label: impl Into<String>, value: f64, comparison: f64, meta: EntryMeta) -> Entry {
        Self(label.into(), value, comparison, meta)
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.1
    }

    #[inline]
    pub fn comparison(&self) -> f64 {
        self.2
    }

    #[inline]
    pub fn meta(&self) -> &EntryMeta {
        &self.3
    }
}

/// A `(label, value)` pair of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point(
    String,
    #[serde(serialize_with = "tornado_analyze::number::serialize")] f64,
);

impl Point {
    pub fn new(label: impl Into<String>, value: f64) -> Point {
        Self(label.into(), value)
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesData {
    pub main: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Vec<Point>>,
}
