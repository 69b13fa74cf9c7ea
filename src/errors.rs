use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the fetch → normalize → summarize cycle.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One record carried a timestamp that could not be read; the record is dropped.
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    /// The summarizer was called without values.
    #[error("cannot summarize an empty sample")]
    EmptySample,

    /// The data API could not be reached or answered with garbage.
    #[error("fetch failed: {0}")]
    NetworkFailure(String),

    /// The data API answered, but there was nothing usable in it.
    #[error("no data")]
    NoData,

    /// The dashboard filter form could not be parsed.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkFailure(err.to_string())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidFilter(_) => Self::bad_request(err.to_string()),
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_maps_to_bad_request() {
        let err = AppError::from(PipelineError::InvalidFilter("minRainfall".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("minRainfall"));
    }

    #[test]
    fn other_pipeline_errors_map_to_internal() {
        let err = AppError::from(PipelineError::EmptySample);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
