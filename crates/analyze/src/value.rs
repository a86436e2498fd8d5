use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::key::DimensionKey;

/// A measurement value, possibly grouped under further dimension keys.
///
/// A data set grouped by `n` dimensions nests its scalars exactly `n`
/// branches deep. Branches iterate in ascending raw key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedValue {
    Scalar(#[serde(serialize_with = "crate::number::serialize")] f64),
    Branch(BTreeMap<DimensionKey, NestedValue>),
}

impl NestedValue {
    /// Creates an empty value that will hold scalars `depth` levels deep.
    pub fn empty(depth: usize) -> NestedValue {
        if depth == 0 {
            NestedValue::Scalar(0.0)
        } else {
            NestedValue::Branch(BTreeMap::new())
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            NestedValue::Scalar(_) => 0,
            NestedValue::Branch(children) => {
                1 + children.values().map(NestedValue::depth).max().unwrap_or(0)
            }
        }
    }

    /// Sums all scalars of this value.
    pub fn total(&self) -> f64 {
        match self {
            NestedValue::Scalar(value) => *value,
            NestedValue::Branch(children) => children.values().map(NestedValue::total).sum(),
        }
    }

    #[inline]
    pub fn scalar(&self) -> Option<f64> {
        match self {
            NestedValue::Scalar(value) => Some(*value),
            NestedValue::Branch(_) => None,
        }
    }

    #[inline]
    pub fn as_branch(&self) -> Option<&BTreeMap<DimensionKey, NestedValue>> {
        match self {
            NestedValue::Scalar(_) => None,
            NestedValue::Branch(children) => Some(children),
        }
    }

    pub fn get(&self, key: &DimensionKey) -> Option<&NestedValue> {
        self.as_branch().and_then(|children| children.get(key))
    }

    pub fn get_path(&self, path: &[DimensionKey]) -> Option<&NestedValue> {
        path.iter().try_fold(self, |value, key| value.get(key))
    }

    /// Number of direct children; scalars have none.
    pub fn len(&self) -> usize {
        self.as_branch().map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if every scalar sits exactly `depth` levels deep.
    ///
    /// Empty branches carry no scalars and are accepted at any level above the leaves.
    pub fn has_depth(&self, depth: usize) -> bool {
        match self {
            NestedValue::Scalar(_) => depth == 0,
            NestedValue::Branch(children) => {
                depth > 0 && children.values().all(|child| child.has_depth(depth - 1))
            }
        }
    }

    /// Adds `value` to the scalar found by following `path`, creating the
    /// missing branches on the way.
    pub(crate) fn accumulate(&mut self, path: &[DimensionKey], value: f64) {
        match (self, path.split_first()) {
            (NestedValue::Scalar(total), None) => *total += value,
            (NestedValue::Branch(children), Some((key, rest))) => children
                .entry(key.clone())
                .or_insert_with(|| NestedValue::empty(rest.len()))
                .accumulate(rest, value),
            // Shapes disagree only if the path length differs from the depth,
            // which the data set rules out on construction.
            _ => {}
        }
    }

    /// Visits every scalar together with the keys leading to it.
    pub(crate) fn for_each_leaf<F>(&self, path: &mut Vec<DimensionKey>, f: &mut F)
    where
        F: FnMut(&[DimensionKey], f64),
    {
        match self {
            NestedValue::Scalar(value) => f(path, *value),
            NestedValue::Branch(children) => {
                for (key, child) in children {
                    path.push(key.clone());
                    child.for_each_leaf(path, f);
                    path.pop();
                }
            }
        }
    }
}

impl From<f64> for NestedValue {
    fn from(value: f64) -> Self {
        NestedValue::Scalar(value)
    }
}

impl FromIterator<(DimensionKey, NestedValue)> for NestedValue {
    fn from_iter<T: IntoIterator<Item = (DimensionKey, NestedValue)>>(iter: T) -> Self {
        NestedValue::Branch(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(encoded: &str) -> DimensionKey {
        DimensionKey::parse(encoded)
    }

    fn leaf(value: f64) -> NestedValue {
        NestedValue::Scalar(value)
    }

    fn sample() -> NestedValue {
        NestedValue::from_iter([
            (
                key("gender:female"),
                NestedValue::from_iter([
                    (key("age:18-24"), leaf(4.0)),
                    (key("age:25-34"), leaf(6.0)),
                ]),
            ),
            (
                key("gender:male"),
                NestedValue::from_iter([(key("age:18-24"), leaf(20.0))]),
            ),
        ])
    }

    #[test]
    fn total_sums_all_scalars() {
        assert_eq!(sample().total(), 30.0);
        assert_eq!(NestedValue::Scalar(7.0).total(), 7.0);
    }

    #[test]
    fn depth_counts_branch_levels() {
        assert_eq!(sample().depth(), 2);
        assert_eq!(NestedValue::Scalar(1.0).depth(), 0);
        assert_eq!(NestedValue::empty(3).depth(), 1);
    }

    #[test]
    fn has_depth_rejects_uneven_nesting() {
        let uneven = NestedValue::from_iter([
            (key("gender:female"), leaf(4.0)),
            (
                key("gender:male"),
                NestedValue::from_iter([(key("age:18-24"), leaf(20.0))]),
            ),
        ]);

        assert!(sample().has_depth(2));
        assert!(!sample().has_depth(1));
        assert!(!uneven.has_depth(1));
        assert!(!uneven.has_depth(2));
        assert!(NestedValue::empty(2).has_depth(2));
    }

    #[test]
    fn get_path_follows_keys() {
        let value = sample();

        let found = value.get_path(&[key("gender:female"), key("age:25-34")]);
        assert_eq!(found.and_then(NestedValue::scalar), Some(6.0));

        let missing = value.get_path(&[key("gender:male"), key("age:25-34")]);
        assert_eq!(missing, None);
    }

    #[test]
    fn accumulate_creates_missing_branches() {
        let mut value = NestedValue::empty(2);

        value.accumulate(&[key("gender:female"), key("age:18-24")], 3.0);
        value.accumulate(&[key("gender:female"), key("age:18-24")], 1.0);

        assert_eq!(
            value.get_path(&[key("gender:female"), key("age:18-24")]),
            Some(&NestedValue::Scalar(4.0))
        );
    }

    #[test]
    fn deserializes_from_json_objects() {
        let value: NestedValue =
            serde_json::from_str(r#"{"gender:female": 10, "gender:male": 20.5}"#).unwrap();

        assert_eq!(value.get(&key("gender:male")), Some(&NestedValue::Scalar(20.5)));
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn serializes_whole_numbers_as_integers() {
        let json = serde_json::to_string(&sample()).unwrap();

        assert_eq!(
            json,
            r#"{"gender:female":{"age:18-24":4,"age:25-34":6},"gender:male":{"age:18-24":20}}"#
        );
        assert_eq!(serde_json::to_string(&leaf(2.5)).unwrap(), "2.5");
    }
}
