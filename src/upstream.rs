use crate::errors::PipelineError;
use crate::models::{QueryParameters, RawRecord, Statistics};
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP client for the rainfall data API.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    endpoint: Url,
}

impl UpstreamClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn fetch(&self, params: &QueryParameters) -> Result<UpstreamBody, PipelineError> {
        info!("fetching {} with {:?}", self.endpoint, params.pairs());
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(params.pairs())
            .send()
            .await?
            .error_for_status()?;
        let body = response.json::<UpstreamBody>().await?;
        debug!("upstream returned {} raw entries", body.entry_count());
        Ok(body)
    }
}

/// Either response shape the data API has used.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UpstreamBody {
    /// A bare array of records.
    Records(Vec<Value>),
    /// An object with records plus optional precomputed aggregates.
    Envelope {
        #[serde(default, alias = "records")]
        data: Option<Vec<Value>>,
        #[serde(default)]
        statistics: Option<Value>,
        #[serde(default)]
        value_counts: Option<Value>,
    },
}

/// Parts of an upstream body after per-entry decoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpstreamParts {
    pub records: Vec<RawRecord>,
    pub statistics: Option<Statistics>,
    pub value_counts: Option<BTreeMap<String, u64>>,
    pub skipped: usize,
}

impl UpstreamBody {
    fn entry_count(&self) -> usize {
        match self {
            Self::Records(entries) => entries.len(),
            Self::Envelope { data, .. } => data.as_ref().map_or(0, Vec::len),
        }
    }

    /// Decodes entries one by one so a single bad entry does not sink the batch.
    pub fn into_parts(self) -> UpstreamParts {
        let (entries, statistics, value_counts) = match self {
            Self::Records(entries) => (entries, None, None),
            Self::Envelope {
                data,
                statistics,
                value_counts,
            } => (
                data.unwrap_or_default(),
                statistics.and_then(|value| decode_aggregate::<Statistics>("statistics", value)),
                value_counts.and_then(|value| decode_aggregate::<BTreeMap<String, u64>>("value_counts", value)),
            ),
        };

        let mut skipped = 0;
        let records = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<RawRecord>(entry) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("skipping upstream entry: {err}");
                    skipped += 1;
                    None
                }
            })
            .collect();

        UpstreamParts {
            records,
            statistics,
            value_counts,
            skipped,
        }
    }
}

/// Aggregates that do not decode are dropped so they get computed locally instead.
fn decode_aggregate<T: DeserializeOwned>(name: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            warn!("ignoring upstream {name}: {err}");
            None
        }
    }
}
