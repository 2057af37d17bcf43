//! Location estimates over tabular data: mean, trimmed mean, median and a
//! group-weighted mean, with loaders for CSV, JSON and Parquet tables.

pub mod data;
pub mod error;
pub mod report;
pub mod stats;

pub use data::model::{Dataset, Record, Value};
pub use error::StatsError;
pub use report::{LocationReport, ReportConfig};
