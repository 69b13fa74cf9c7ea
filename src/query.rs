use crate::errors::PipelineError;
use crate::models::{FilterCriteria, FilterForm, QueryParameters, Timestamp};
use crate::timestamp::normalize;

pub const START_DATE: &str = "startDate";
pub const END_DATE: &str = "endDate";
pub const MIN_RAINFALL: &str = "minRainfall";
pub const MAX_RAINFALL: &str = "maxRainfall";
pub const SPECIFIC_RAINFALL: &str = "specificRainfall";

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Query parameters for the data API.
///
/// Equal min and max collapse into a single `specificRainfall`. Date order is not checked.
pub fn build(criteria: &FilterCriteria) -> QueryParameters {
    let mut params = QueryParameters::default();

    if let Some(start) = criteria.start_date {
        params.push(START_DATE, format_date(start));
    }
    if let Some(end) = criteria.end_date {
        params.push(END_DATE, format_date(end));
    }

    match (criteria.min_value, criteria.max_value) {
        (Some(min), Some(max)) if min == max => params.push(SPECIFIC_RAINFALL, min.to_string()),
        (min, max) => {
            if let Some(min) = min {
                params.push(MIN_RAINFALL, min.to_string());
            }
            if let Some(max) = max {
                params.push(MAX_RAINFALL, max.to_string());
            }
        }
    }

    params
}

fn format_date(instant: Timestamp) -> String {
    instant.format(DATE_FORMAT).to_string()
}

impl TryFrom<FilterForm> for FilterCriteria {
    type Error = PipelineError;

    fn try_from(form: FilterForm) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: parse_field(START_DATE, form.start_date, parse_date)?,
            end_date: parse_field(END_DATE, form.end_date, parse_date)?,
            min_value: parse_field(MIN_RAINFALL, form.min_rainfall, parse_number)?,
            max_value: parse_field(MAX_RAINFALL, form.max_rainfall, parse_number)?,
        })
    }
}

fn parse_field<T>(
    name: &str,
    field: Option<String>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, PipelineError> {
    let Some(text) = field else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse(text)
        .map(Some)
        .ok_or_else(|| PipelineError::InvalidFilter(format!("{name}={text:?}")))
}

fn parse_date(text: &str) -> Option<Timestamp> {
    normalize(text).ok()
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
