//! Pivotable data sets.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;
use tracing::trace;

use crate::dimension::DimensionCollection;
use crate::error::AnalyzeError;
use crate::error::Result;
use crate::key::DimensionKey;
use crate::value::NestedValue;

/// The quantities measured for every combination of dimension values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Interactions,
    UniqueAuthors,
}

impl Measure {
    pub const ALL: [Measure; 2] = [Measure::Interactions, Measure::UniqueAuthors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Interactions => "interactions",
            Measure::UniqueAuthors => "unique_authors",
        }
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The measure values observed for one combination of dimension keys.
///
/// `keys` holds one key per dimension, in the order of the owning data set's
/// dimension collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub keys: Vec<DimensionKey>,
    pub values: BTreeMap<Measure, f64>,
}

impl Row {
    pub fn new(keys: Vec<DimensionKey>, values: BTreeMap<Measure, f64>) -> Row {
        Self { keys, values }
    }
}

/// Measurement values grouped by a collection of dimensions.
///
/// A data set is stored as flat rows, which makes reordering the dimensions a
/// matter of permuting row keys. [`DataSet::simple`] folds the rows back into
/// the nested per-measure form the chart generators walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSet {
    dimensions: DimensionCollection,
    rows: Vec<Row>,
}

impl DataSet {
    /// Builds a data set from values nested as deep as there are dimensions.
    pub fn new(
        dimensions: DimensionCollection,
        data: BTreeMap<Measure, NestedValue>,
    ) -> Result<DataSet> {
        let depth = dimensions.len();
        let mut rows: BTreeMap<Vec<DimensionKey>, BTreeMap<Measure, f64>> = BTreeMap::new();

        for (measure, value) in &data {
            if !value.has_depth(depth) {
                return Err(AnalyzeError::DepthMismatch {
                    measure: *measure,
                    expected: depth,
                });
            }

            value.for_each_leaf(
                &mut Vec::with_capacity(depth),
                &mut |path: &[DimensionKey], leaf: f64| {
                    *rows
                        .entry(path.to_vec())
                        .or_default()
                        .entry(*measure)
                        .or_insert(0.0) += leaf;
                },
            );
        }

        let rows = rows
            .into_iter()
            .map(|(keys, values)| Row::new(keys, values))
            .collect();

        Ok(Self { dimensions, rows })
    }

    /// Builds a data set from flat rows.
    pub fn from_rows(dimensions: DimensionCollection, rows: Vec<Row>) -> Result<DataSet> {
        if let Some(row) = rows.iter().find(|row| row.keys.len() != dimensions.len()) {
            return Err(AnalyzeError::RowWidth {
                expected: dimensions.len(),
                actual: row.keys.len(),
            });
        }

        Ok(Self { dimensions, rows })
    }

    #[inline]
    pub fn dimensions(&self) -> &DimensionCollection {
        &self.dimensions
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The measures that have at least one value.
    pub fn measures(&self) -> BTreeSet<Measure> {
        self.rows
            .iter()
            .flat_map(|row| row.values.keys().copied())
            .collect()
    }

    pub fn total(&self, measure: Measure) -> f64 {
        self.rows
            .iter()
            .filter_map(|row| row.values.get(&measure))
            .sum()
    }

    /// Reorders the dimension levels to follow `target`.
    ///
    /// With `invert` set the target is applied in last-first order. The target
    /// must name exactly the dimensions of this data set. Values are carried
    /// over untouched.
    pub fn pivot(&self, target: &DimensionCollection, invert: bool) -> Result<DataSet> {
        let target = if invert {
            target.last_first()
        } else {
            target.clone()
        };

        if target.len() != self.dimensions.len() {
            return Err(AnalyzeError::PivotLength {
                expected: self.dimensions.len(),
                actual: target.len(),
            });
        }

        let mut order: Vec<usize> = Vec::with_capacity(target.len());
        for dimension in &target {
            let position = self
                .dimensions
                .position(dimension.target())
                .ok_or_else(|| AnalyzeError::UnknownDimension(dimension.target().to_owned()))?;

            if order.contains(&position) {
                return Err(AnalyzeError::DuplicateDimension(
                    dimension.target().to_owned(),
                ));
            }

            order.push(position);
        }

        trace!(?order, rows = self.rows.len(), "pivoting data set");

        let dimensions = order
            .iter()
            .filter_map(|&position| self.dimensions.get(position).cloned())
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| Row {
                keys: order.iter().map(|&position| row.keys[position].clone()).collect(),
                values: row.values.clone(),
            })
            .collect();

        Ok(Self { dimensions, rows })
    }

    /// Folds the rows into nested values per measure, one level per dimension.
    pub fn simple(&self) -> BTreeMap<Measure, NestedValue> {
        let depth = self.dimensions.len();
        let mut simple: BTreeMap<Measure, NestedValue> = BTreeMap::new();

        for row in &self.rows {
            for (measure, value) in &row.values {
                simple
                    .entry(*measure)
                    .or_insert_with(|| NestedValue::empty(depth))
                    .accumulate(&row.keys, *value);
            }
        }

        simple
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dimension::Dimension;

    fn key(encoded: &str) -> DimensionKey {
        DimensionKey::parse(encoded)
    }

    fn gender_age() -> DimensionCollection {
        DimensionCollection::from_iter([Dimension::new("gender"), Dimension::new("age")])
    }

    fn nested(json: &str) -> BTreeMap<Measure, NestedValue> {
        serde_json::from_str(json).unwrap()
    }

    fn sample() -> DataSet {
        DataSet::new(
            gender_age(),
            nested(
                r#"{
                    "interactions": {
                        "gender:female": {"age:18-24": 4, "age:25-34": 6},
                        "gender:male": {"age:18-24": 20}
                    },
                    "unique_authors": {
                        "gender:female": {"age:18-24": 2},
                        "gender:male": {"age:18-24": 9}
                    }
                }"#,
            ),
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_values_nested_at_the_wrong_depth() {
        let result = DataSet::new(
            gender_age(),
            nested(r#"{"interactions": {"gender:female": 4}}"#),
        );

        assert_eq!(
            result,
            Err(AnalyzeError::DepthMismatch {
                measure: Measure::Interactions,
                expected: 2
            })
        );
    }

    #[test]
    fn from_rows_rejects_rows_of_the_wrong_width() {
        let rows = vec![Row::new(
            vec![key("gender:female")],
            BTreeMap::from([(Measure::Interactions, 1.0)]),
        )];

        assert_eq!(
            DataSet::from_rows(gender_age(), rows),
            Err(AnalyzeError::RowWidth {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn simple_restores_the_nested_form() {
        let simple = sample().simple();

        let expected = nested(
            r#"{
                "interactions": {
                    "gender:female": {"age:18-24": 4, "age:25-34": 6},
                    "gender:male": {"age:18-24": 20}
                },
                "unique_authors": {
                    "gender:female": {"age:18-24": 2},
                    "gender:male": {"age:18-24": 9}
                }
            }"#,
        );
        assert_eq!(simple, expected);
    }

    #[test]
    fn pivot_swaps_the_nesting_order() {
        let pivoted = sample()
            .pivot(
                &DimensionCollection::from_iter([Dimension::new("age"), Dimension::new("gender")]),
                false,
            )
            .unwrap();

        let simple = pivoted.simple();
        let interactions = &simple[&Measure::Interactions];
        let expected: NestedValue = serde_json::from_str(
            r#"{
                "age:18-24": {"gender:female": 4, "gender:male": 20},
                "age:25-34": {"gender:female": 6}
            }"#,
        )
        .unwrap();

        assert_eq!(interactions, &expected);
        assert_eq!(pivoted.dimensions().first().map(Dimension::target), Some("age"));
    }

    #[test]
    fn pivot_with_invert_uses_last_first_order() {
        let data_set = sample();

        let inverted = data_set.pivot(&gender_age(), true).unwrap();
        let explicit = data_set.pivot(&gender_age().last_first(), false).unwrap();

        assert_eq!(inverted, explicit);
    }

    #[test]
    fn pivot_round_trip_restores_the_original() {
        let data_set = sample();

        let pivoted = data_set.pivot(&gender_age().last_first(), false).unwrap();
        let restored = pivoted.pivot(data_set.dimensions(), false).unwrap();

        assert_eq!(restored, data_set);
        assert_eq!(restored.simple(), data_set.simple());
    }

    #[test]
    fn pivot_keeps_every_value() {
        let data_set = sample();
        let pivoted = data_set.pivot(&gender_age(), true).unwrap();

        for measure in Measure::ALL {
            assert_eq!(pivoted.total(measure), data_set.total(measure));
        }
        assert_eq!(pivoted.rows().len(), data_set.rows().len());
    }

    #[test]
    fn pivot_rejects_foreign_dimensions() {
        let data_set = sample();

        let unknown = DimensionCollection::from_iter([
            Dimension::new("gender"),
            Dimension::new("location"),
        ]);
        assert_eq!(
            data_set.pivot(&unknown, false),
            Err(AnalyzeError::UnknownDimension(String::from("location")))
        );

        let duplicate =
            DimensionCollection::from_iter([Dimension::new("gender"), Dimension::new("gender")]);
        assert_eq!(
            data_set.pivot(&duplicate, false),
            Err(AnalyzeError::DuplicateDimension(String::from("gender")))
        );

        let short = DimensionCollection::from_iter([Dimension::new("gender")]);
        assert_eq!(
            data_set.pivot(&short, false),
            Err(AnalyzeError::PivotLength {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn measures_and_totals() {
        let data_set = sample();

        assert_eq!(
            data_set.measures().into_iter().collect::<Vec<_>>(),
            Measure::ALL
        );
        assert_eq!(data_set.total(Measure::Interactions), 30.0);
        assert_eq!(data_set.total(Measure::UniqueAuthors), 11.0);
    }

    #[test]
    fn empty_data_set_has_no_measures() {
        let data_set = DataSet::new(gender_age(), BTreeMap::new()).unwrap();

        assert!(data_set.is_empty());
        assert!(data_set.simple().is_empty());
    }
}
