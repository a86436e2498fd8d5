//! Baseline rescaling.
//!
//! A baseline data set describes a reference population. To compare it with
//! the current data in absolute terms, its values are scaled so that its
//! total volume matches the current data's total, keeping its shape.

use std::collections::BTreeMap;

use tornado_analyze::Measure;
use tornado_analyze::NestedValue;

/// Rescales `baseline` to the total volume of `data`.
///
/// The ratio is `total(data) / total(baseline)`, or `0` for an empty baseline.
/// Only keys present in both inputs are kept, and every value is rounded to
/// the nearest integer.
pub fn rescale(data: &NestedValue, baseline: &NestedValue) -> NestedValue {
    scale(data, baseline, ratio(data, baseline))
}

/// Rescales every measure of `baseline` that `data` also has, each with its own ratio.
pub fn rescale_all(
    data: &BTreeMap<Measure, NestedValue>,
    baseline: &BTreeMap<Measure, NestedValue>,
) -> BTreeMap<Measure, NestedValue> {
    baseline
        .iter()
        .filter_map(|(measure, baseline)| {
            data.get(measure)
                .map(|data| (*measure, rescale(data, baseline)))
        })
        .collect()
}

pub fn ratio(data: &NestedValue, baseline: &NestedValue) -> f64 {
    let baseline_total = baseline.total();

    if baseline_total == 0.0 {
        0.0
    } else {
        data.total() / baseline_total
    }
}

fn scale(data: &NestedValue, baseline: &NestedValue, ratio: f64) -> NestedValue {
    match (data, baseline) {
        (NestedValue::Branch(data), NestedValue::Branch(baseline)) => baseline
            .iter()
            .filter_map(|(key, baseline)| {
                data.get(key)
                    .map(|data| (key.clone(), scale(data, baseline, ratio)))
            })
            .collect(),
        (_, baseline) => NestedValue::Scalar((baseline.total() * ratio).round()),
    }
}
