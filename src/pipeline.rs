use crate::errors::PipelineError;
use crate::models::{Dashboard, StatisticsSource};
use crate::stats::{summarize, value_counts, value_counts_from_map};
use crate::timestamp::normalize_batch;
use crate::upstream::UpstreamBody;

/// Shapes one upstream body into chart-ready data.
///
/// Aggregates shipped by the data API win over local computation.
pub fn shape(body: UpstreamBody) -> Result<Dashboard, PipelineError> {
    let parts = body.into_parts();
    let batch = normalize_batch(parts.records);
    if batch.records.is_empty() {
        return Err(PipelineError::NoData);
    }

    let values: Vec<f64> = batch.records.iter().map(|record| record.value).collect();
    let (statistics, statistics_source) = match parts.statistics {
        Some(statistics) => (statistics, StatisticsSource::Upstream),
        None => (summarize(&values)?, StatisticsSource::Computed),
    };
    let value_counts = match parts.value_counts.map(|map| value_counts_from_map(&map)) {
        Some(counts) if !counts.is_empty() => counts,
        _ => value_counts(&values),
    };

    Ok(Dashboard {
        records: batch.records,
        statistics,
        statistics_source,
        value_counts,
        skipped: parts.skipped + batch.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: serde_json::Value) -> UpstreamBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn computes_when_upstream_has_no_aggregates() {
        let dashboard = shape(body(json!([
            { "time": "Wed, 05 Jan 2022 00:00:00", "RG_A": 1.0 },
            { "time": "Thu, 06 Jan 2022 00:00:00", "RG_A": 2.0 },
            { "time": "bad", "RG_A": 100.0 },
            { "time": "Fri, 07 Jan 2022 00:00:00", "RG_A": 3.0 },
            { "time": "Sat, 08 Jan 2022 00:00:00", "RG_A": 4.0 }
        ])))
        .unwrap();

        assert_eq!(dashboard.records.len(), 4);
        assert_eq!(dashboard.skipped, 1);
        assert_eq!(dashboard.statistics_source, StatisticsSource::Computed);
        assert_eq!(dashboard.statistics.total_count, 4);
        assert_eq!(dashboard.statistics.highest, 4.0);
        assert_eq!(dashboard.value_counts.len(), 4);
    }

    #[test]
    fn passes_upstream_statistics_through() {
        let dashboard = shape(body(json!({
            "data": [{ "time": "2022-01-05T00:00:00", "value": 1.0 }],
            "statistics": {
                "highest": 9.0, "lowest": 0.0, "mean": 4.2, "median": 3.3,
                "standard_deviation": 1.1, "range": 9.0, "total_count": 50
            },
            "value_counts": { "0.0": 40, "9.0": 10 }
        })))
        .unwrap();

        assert_eq!(dashboard.statistics_source, StatisticsSource::Upstream);
        assert_eq!(dashboard.statistics.mean, 4.2);
        assert_eq!(dashboard.statistics.total_count, 50);
        assert_eq!(dashboard.value_counts[1].count, 10);
    }

    #[test]
    fn null_upstream_deviation_falls_back_to_computed() {
        let dashboard = shape(body(json!({
            "data": [{ "time": "2022-01-05T00:00:00", "value": 0.8 }],
            "statistics": {
                "highest": 0.8, "lowest": 0.8, "mean": 0.8, "median": 0.8,
                "standard_deviation": null, "range": 0.0, "total_count": 1
            }
        })))
        .unwrap();

        assert_eq!(dashboard.statistics_source, StatisticsSource::Computed);
        assert_eq!(dashboard.statistics.standard_deviation, 0.0);
        assert_eq!(dashboard.statistics.total_count, 1);
    }

    #[test]
    fn non_numeric_upstream_counts_fall_back_to_computed() {
        let dashboard = shape(body(json!({
            "data": [
                { "time": "2022-01-05T00:00:00", "value": 0.5 },
                { "time": "2022-01-06T00:00:00", "value": 0.5 }
            ],
            "value_counts": { "n/a": 2 }
        })))
        .unwrap();

        assert_eq!(
            dashboard.value_counts,
            vec![crate::models::ValueCount { value: 0.5, count: 2 }]
        );
    }

    #[test]
    fn empty_array_is_no_data() {
        assert!(matches!(shape(body(json!([]))), Err(PipelineError::NoData)));
    }

    #[test]
    fn only_malformed_records_is_no_data() {
        let result = shape(body(json!([{ "time": "nope", "value": 1.0 }])));
        assert!(matches!(result, Err(PipelineError::NoData)));
    }
}
