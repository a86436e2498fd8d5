//! Tornado's analysis data model.
//!
//! A [`DataSet`] holds measurement values (interactions, unique authors)
//! grouped by one or more [`Dimension`]s. Chart generators pivot a data set
//! into the dimension order they need and walk its flattened, nested form.
//!
//! Nested levels are keyed by [`DimensionKey`]s, which are encoded on the
//! wire as `dimension:value`.

mod key;
mod value;

pub mod dataset;
pub mod dimension;
pub mod error;
pub mod number;

pub use crate::dataset::DataSet;
pub use crate::dataset::Measure;
pub use crate::dataset::Row;
pub use crate::dimension::Dimension;
pub use crate::dimension::DimensionCollection;
pub use crate::key::DimensionKey;
pub use crate::key::KEY_SEPARATOR;
pub use crate::value::NestedValue;
