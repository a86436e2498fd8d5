//! Named axes that group measurements.

use std::fmt::Display;
use std::fmt::Formatter;
use std::slice::Iter;

use serde::Deserialize;
use serde::Serialize;

/// A named axis, e.g. `fb.author.gender`, that measurements are grouped by.
///
/// Deserializes from either a bare target string or a full object:
///
/// ```json
/// "fb.author.gender"
/// { "target": "interaction.created_at", "label": "Time", "time": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "DimensionRepr")]
pub struct Dimension {
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    time: bool,
}

impl Dimension {
    pub fn new(target: impl Into<String>) -> Dimension {
        Self {
            target: target.into(),
            label: None,
            time: false,
        }
    }

    /// Creates a dimension whose values are points in time.
    pub fn time(target: impl Into<String>) -> Dimension {
        Self {
            time: true,
            ..Self::new(target)
        }
    }

    pub fn with_label(self, label: impl Into<String>) -> Dimension {
        Self {
            label: Some(label.into()),
            ..self
        }
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[inline]
    pub fn is_time(&self) -> bool {
        self.time
    }

    /// The label if one was given, otherwise the target.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.target)
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Target(String),
    Full {
        target: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        time: bool,
    },
}

impl From<DimensionRepr> for Dimension {
    fn from(repr: DimensionRepr) -> Self {
        match repr {
            DimensionRepr::Target(target) => Dimension::new(target),
            DimensionRepr::Full {
                target,
                label,
                time,
            } => Dimension {
                target,
                label,
                time,
            },
        }
    }
}

/// An ordered list of dimensions.
///
/// The declared order is the nesting order of a data set grouped by these
/// dimensions: the first dimension is the outermost key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionCollection {
    dimensions: Vec<Dimension>,
}

impl DimensionCollection {
    pub fn new(dimensions: Vec<Dimension>) -> DimensionCollection {
        Self { dimensions }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Dimension> {
        self.dimensions.iter()
    }

    /// Iterates from the last declared dimension to the first.
    pub fn iter_last_first(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.iter().rev()
    }

    /// Returns a collection in last-first order, so the last declared
    /// dimension becomes the outermost key.
    pub fn last_first(&self) -> DimensionCollection {
        self.iter_last_first().cloned().collect()
    }

    pub fn get(&self, index: usize) -> Option<&Dimension> {
        self.dimensions.get(index)
    }

    pub fn first(&self) -> Option<&Dimension> {
        self.dimensions.first()
    }

    pub fn find(&self, target: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.target == target)
    }

    pub fn position(&self, target: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d.target == target)
    }

    pub fn contains(&self, target: &str) -> bool {
        self.position(target).is_some()
    }

    /// Returns `true` if both collections name the same dimensions,
    /// regardless of their order.
    pub fn same_dimensions(&self, other: &DimensionCollection) -> bool {
        self.len() == other.len() && self.iter().all(|d| other.contains(d.target()))
    }
}

impl FromIterator<Dimension> for DimensionCollection {
    fn from_iter<T: IntoIterator<Item = Dimension>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DimensionCollection {
    type Item = &'a Dimension;
    type IntoIter = Iter<'a, Dimension>;

    fn into_iter(self) -> Self::IntoIter {
        self.dimensions.iter()
    }
}

impl IntoIterator for DimensionCollection {
    type Item = Dimension;
    type IntoIter = std::vec::IntoIter<Dimension>;

    fn into_iter(self) -> Self::IntoIter {
        self.dimensions.into_iter()
    }
}
