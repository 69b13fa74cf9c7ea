use crate::errors::PipelineError;
use crate::models::{
    Dashboard, NormalizedRecord, QueryParameters, Statistics, StatisticsSource, ValueCount,
};
use crate::upstream::UpstreamClient;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub view: Arc<Mutex<DashboardView>>,
}

impl AppState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self {
            upstream,
            view: Arc::new(Mutex::new(DashboardView::default())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    #[default]
    Idle,
    Ready,
    NoData,
    FetchFailed,
}

/// What the page currently shows. Each fetch cycle consumes the old view and returns the next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: ViewStatus,
    pub query: QueryParameters,
    pub records: Vec<NormalizedRecord>,
    pub statistics: Option<Statistics>,
    pub statistics_source: Option<StatisticsSource>,
    pub value_counts: Vec<ValueCount>,
    pub skipped: usize,
    pub message: Option<String>,
}

impl DashboardView {
    pub fn render(self, query: QueryParameters, outcome: Result<Dashboard, PipelineError>) -> Self {
        match outcome {
            Ok(dashboard) => {
                info!(
                    "rendering {} records ({} skipped)",
                    dashboard.records.len(),
                    dashboard.skipped
                );
                Self {
                    status: ViewStatus::Ready,
                    query,
                    records: dashboard.records,
                    statistics: Some(dashboard.statistics),
                    statistics_source: Some(dashboard.statistics_source),
                    value_counts: dashboard.value_counts,
                    skipped: dashboard.skipped,
                    message: None,
                }
            }
            // Keep whatever was on screen; only flag that this cycle produced nothing.
            Err(PipelineError::NetworkFailure(reason)) => {
                error!("fetch or render error: {reason}");
                Self {
                    status: ViewStatus::FetchFailed,
                    query,
                    message: Some("No data available: the data service could not be reached.".into()),
                    ..self
                }
            }
            Err(err) => {
                info!("no data for {:?}: {err}", query.pairs());
                Self {
                    status: ViewStatus::NoData,
                    query,
                    message: Some("No data available for the selected filters.".into()),
                    ..Self::default()
                }
            }
        }
    }
}
