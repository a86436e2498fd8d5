//! Defines the `Error` and `Result` types that this crate uses.

use thiserror::Error;

use crate::dataset::Measure;

/// The result type that uses [AnalyzeError] as the error type.
pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// The error type for building and pivoting data sets.
///
/// These errors describe malformed input handed over by the upstream
/// analysis step; they are never produced for absent or sparse data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnalyzeError {
    /// The nested values of a measure do not sit exactly as many levels deep
    /// as there are dimensions.
    #[error("analyze error: the `{measure}` values are not nested {expected} levels deep")]
    DepthMismatch { measure: Measure, expected: usize },

    /// A flat row carries a different number of keys than there are dimensions.
    #[error("analyze error: a row has {actual} keys, expected {expected}")]
    RowWidth { expected: usize, actual: usize },

    /// The pivot target has a different number of dimensions than the data set.
    #[error("analyze error: cannot pivot {actual} dimensions into {expected}")]
    PivotLength { expected: usize, actual: usize },

    /// The pivot target names a dimension the data set is not grouped by.
    #[error("analyze error: the data set is not grouped by the `{0}` dimension")]
    UnknownDimension(String),

    /// The pivot target names the same dimension more than once.
    #[error("analyze error: the `{0}` dimension appears more than once")]
    DuplicateDimension(String),
}
