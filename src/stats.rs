use crate::errors::PipelineError;
use crate::models::{Statistics, ValueCount};
use std::collections::BTreeMap;
use tracing::warn;

/// Descriptive statistics over a rainfall sample.
///
/// The standard deviation is the population one (divides by `n`), the same convention
/// the data API uses when it ships statistics itself.
pub fn summarize(values: &[f64]) -> Result<Statistics, PipelineError> {
    if values.is_empty() {
        return Err(PipelineError::EmptySample);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let lowest = sorted[0];
    let highest = sorted[count - 1];
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    Ok(Statistics {
        highest,
        lowest,
        mean,
        median,
        standard_deviation: variance.sqrt(),
        range: highest - lowest,
        total_count: count as u64,
    })
}

/// Frequency of each distinct value, ascending by value.
pub fn value_counts(values: &[f64]) -> Vec<ValueCount> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut counts: Vec<ValueCount> = Vec::new();
    for value in sorted {
        match counts.last_mut() {
            Some(last) if last.value == value => last.count += 1,
            _ => counts.push(ValueCount { value, count: 1 }),
        }
    }
    counts
}

/// Converts the data API's `{"0.5": 3, ...}` mapping into the same shape as [`value_counts`].
pub fn value_counts_from_map(map: &BTreeMap<String, u64>) -> Vec<ValueCount> {
    let mut counts: Vec<ValueCount> = map
        .iter()
        .filter_map(|(key, count)| match key.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(ValueCount {
                value,
                count: *count,
            }),
            _ => {
                warn!("ignoring value count with non-numeric key {key:?}");
                None
            }
        })
        .collect();
    counts.sort_by(|a, b| a.value.total_cmp(&b.value));
    counts
}
