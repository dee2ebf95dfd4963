//! Data contract of the historical monitoring-data endpoint
//! (`GET /monitoring-data`).  One [`LogRecord`] per logged interval.

use crate::error::{Result, SparingError};
use crate::resolve::coerce_finite;
use crate::time::{day_bounds, log_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters for one log fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitoringQuery {
    pub start_date: String,
    pub end_date:   String,
    pub token:      String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter:  Option<String>,
}

impl MonitoringQuery {
    pub fn new(start: &NaiveDateTime, end: &NaiveDateTime, token: impl Into<String>) -> Self {
        Self {
            start_date: log_timestamp(start),
            end_date:   log_timestamp(end),
            token:      token.into(),
            parameter:  None,
        }
    }

    /// Whole-day window, the default view of the log table.
    pub fn for_day(date: NaiveDate, token: impl Into<String>) -> Self {
        let (start, end) = day_bounds(date);
        Self::new(&start, &end, token)
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }
}

/// One historical row.  Parameter columns are kept raw; the backend sends
/// numbers or numeric strings depending on the station firmware.
#[derive(Debug, Clone, Deserialize)]
pub struct LogRecord {
    pub id: u64,
    #[serde(default)]
    pub datetime_client_formated: String,
    #[serde(default)]
    pub ph:    Value,
    #[serde(default)]
    pub tss:   Value,
    #[serde(default)]
    pub nh3n:  Value,
    #[serde(default)]
    pub cod:   Value,
    #[serde(default)]
    pub debit: Value,
}

impl LogRecord {
    /// Numeric value of `parameter` (canonical name, any casing).
    pub fn value(&self, parameter: &str) -> Option<f64> {
        let raw = match parameter.to_lowercase().as_str() {
            "ph"    => &self.ph,
            "tss"   => &self.tss,
            "nh3n"  => &self.nh3n,
            "cod"   => &self.cod,
            "debit" => &self.debit,
            _ => return None,
        };
        coerce_finite(raw)
    }
}

/// Envelope returned by the endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data:    Vec<LogRecord>,
}

impl MonitoringResponse {
    pub fn into_records(self) -> Result<Vec<LogRecord>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(SparingError::Api(
                self.message.unwrap_or_else(|| "Failed to fetch data".into()),
            ))
        }
    }
}
