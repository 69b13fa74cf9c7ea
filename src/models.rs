use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A timezone-naive instant with second resolution.
pub type Timestamp = NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    pub time: String,
    #[serde(alias = "RG_A", alias = "rainfall")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub instant: Timestamp,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub highest: f64,
    pub lowest: f64,
    pub mean: f64,
    pub median: f64,
    pub standard_deviation: f64,
    pub range: f64,
    pub total_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsSource {
    Computed,
    Upstream,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

/// Query string of `/api/dashboard`, exactly as the browser form sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterForm {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_rainfall: Option<String>,
    pub max_rainfall: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParameters(pub Vec<(String, String)>);

impl QueryParameters {
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.0.push((key.to_string(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Everything one successful cycle hands to the view.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub records: Vec<NormalizedRecord>,
    pub statistics: Statistics,
    pub statistics_source: StatisticsSource,
    pub value_counts: Vec<ValueCount>,
    pub skipped: usize,
}
