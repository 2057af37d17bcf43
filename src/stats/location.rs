//! Location estimates over a numeric column.

use crate::error::StatsError;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean after cutting `floor(n * proportion_to_cut)` values from each end of
/// the sorted data. Unlike winsorizing, the cut values are dropped rather
/// than clamped.
pub fn trimmed_mean(values: &[f64], proportion_to_cut: f64) -> Result<f64, StatsError> {
    if !(0.0..0.5).contains(&proportion_to_cut) {
        return Err(StatsError::InvalidProportion(proportion_to_cut));
    }
    let sorted = sorted_or_nan(values)?;
    let Some(sorted) = sorted else {
        return Ok(f64::NAN);
    };
    let n = sorted.len();
    let cut = (n as f64 * proportion_to_cut).floor() as usize;
    mean(&sorted[cut..n - cut])
}

/// Middle value, or the average of the two middle values for even counts.
pub fn median(values: &[f64]) -> Result<f64, StatsError> {
    let Some(sorted) = sorted_or_nan(values)? else {
        return Ok(f64::NAN);
    };
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Sorted copy of `values`, or `None` if any of them is NaN.
fn sorted_or_nan(values: &[f64]) -> Result<Option<Vec<f64>>, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if values.iter().any(|v| v.is_nan()) {
        return Ok(None);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(Some(sorted))
}
