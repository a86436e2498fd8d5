//! Tornado's chart generation library.
//!
//! Generators take a primary [`DataSet`](tornado_analyze::DataSet), an
//! optional secondary data set to compare against and a [`ComparisonMode`],
//! and produce [`Chart`]s whose data is ready to be handed to the client
//! renderer as JSON.
//!
//! ```no_run
//! use tornado_analyze::DataSet;
//! use tornado_analyze::DimensionCollection;
//! use tornado_chart::generator_for;
//! use tornado_chart::ChartType;
//! use tornado_chart::ComparisonMode;
//!
//! # use tornado_chart::error::Result;
//! # fn charts(dimensions: &DimensionCollection, data: &DataSet) -> Result<()> {
//! let generator = generator_for(ChartType::Histogram);
//! let charts = generator.generate(dimensions, data, None, ComparisonMode::Compare)?;
//! # Ok(())
//! # }
//! ```

pub mod baseline;
pub mod chart;
pub mod error;
pub mod generator;
pub mod mode;
pub mod name;

pub use crate::chart::Chart;
pub use crate::chart::ChartData;
pub use crate::chart::ChartType;
pub use crate::chart::Entry;
pub use crate::chart::meta::EntryMeta;
pub use crate::generator::Generator;
pub use crate::generator::generator_for;
pub use crate::generator::histogram::Histogram;
pub use crate::generator::time_series::TimeSeries;
pub use crate::generator::tornado::Tornado;
pub use crate::mode::ComparisonMode;
pub use crate::name::DimensionNames;
pub use crate::name::NameGenerator;
