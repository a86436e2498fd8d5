use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ChartError;

/// How the values of a secondary data set relate to the primary one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    /// Secondary values are shown as they are.
    #[default]
    Compare,
    /// Secondary values are rescaled to the primary's total volume first.
    Baseline,
}

impl ComparisonMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMode::Compare => "compare",
            ComparisonMode::Baseline => "baseline",
        }
    }
}

impl Display for ComparisonMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compare" => Ok(ComparisonMode::Compare),
            "baseline" => Ok(ComparisonMode::Baseline),
            other => Err(ChartError::UnknownComparisonMode(other.to_owned())),
        }
    }
}
