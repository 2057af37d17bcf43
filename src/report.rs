use std::fmt;

use serde::Serialize;

use crate::data::model::Dataset;
use crate::error::StatsError;
use crate::stats::{location, weighted};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which columns the report looks at. Defaults match `state.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportConfig {
    /// Column summarised by mean, trimmed mean and median.
    pub measure: String,
    /// Fraction cut from each tail for the trimmed mean.
    pub trim_proportion: f64,
    /// Grouping column for the weighted mean.
    pub group: String,
    /// Column averaged by the weighted and unweighted means.
    pub value: String,
    /// Weight column for the weighted mean.
    pub weight: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            measure: "Population".to_string(),
            trim_proportion: 0.1,
            group: "State".to_string(),
            value: "Murder.Rate".to_string(),
            weight: "Population".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Location estimates of one measure column plus the weighted and unweighted
/// mean of a value column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationReport {
    pub config: ReportConfig,
    pub rows: usize,
    pub mean: f64,
    pub trimmed_mean: f64,
    pub median: f64,
    pub weighted_mean: f64,
    pub unweighted_mean: f64,
}

impl LocationReport {
    pub fn compute(dataset: &Dataset, config: &ReportConfig) -> Result<Self, StatsError> {
        let measure = dataset.numeric_column(&config.measure)?;
        let values = dataset.numeric_column(&config.value)?;

        let report = LocationReport {
            config: config.clone(),
            rows: dataset.len(),
            mean: location::mean(&measure)?,
            trimmed_mean: location::trimmed_mean(&measure, config.trim_proportion)?,
            median: location::median(&measure)?,
            weighted_mean: weighted::weighted_mean(
                &dataset.records,
                &config.group,
                &config.value,
                &config.weight,
            )?,
            unweighted_mean: location::mean(&values)?,
        };
        log::debug!("Computed report over {} rows", report.rows);
        Ok(report)
    }
}

impl fmt::Display for LocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let measure = &self.config.measure;
        writeln!(f, "{measure} mean = {}", self.mean)?;
        writeln!(f, "{measure} trimmed mean = {}", self.trimmed_mean)?;
        writeln!(f, "{measure} median = {}", self.median)?;
        writeln!(f, "Weighted mean = {}", self.weighted_mean)?;
        write!(f, "Unweighted mean = {}", self.unweighted_mean)
    }
}
