//! Prometheus query response envelope.
//!
//! These types match the JSON returned by the `/api/v1/query` and
//! `/api/v1/query_range` endpoints. A response with error status or an empty
//! result list means "no data" - it is a valid value, never an error to
//! propagate.

use std::collections::BTreeMap;

/// Top-level status of a query response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QueryStatus {
    Success,
    Error,
}

/// Shape of the `result` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResultType {
    /// Range query result: one value list per series.
    Matrix,
    /// Instant query result: one sample per series.
    Vector,
    Scalar,
    String,
}

/// One labeled series within a query result.
///
/// Range results carry `values`; instant results carry a single sample
/// instead, so `values` defaults to empty and only the labels are meaningful.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PromSeries {
    /// Label set identifying the series (job, instance, name, image, ...).
    pub metric: BTreeMap<String, String>,
    /// Ordered `(epoch-seconds, raw value string)` samples.
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: Vec<(f64, String)>,
}

impl PromSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metric.insert(key.into(), value.into());
        self
    }

    /// Append a sample.
    pub fn with_value(mut self, timestamp: f64, value: impl Into<String>) -> Self {
        self.values.push((timestamp, value.into()));
        self
    }
}

/// Inner data object of a query response.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PromData {
    #[cfg_attr(feature = "serde", serde(rename = "resultType"))]
    pub result_type: ResultType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub result: Vec<PromSeries>,
}

/// A complete query response envelope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PromResponse {
    pub status: QueryStatus,
    pub data: PromData,
}

impl PromResponse {
    /// The empty error-status envelope substituted on any query failure.
    pub fn empty(result_type: ResultType) -> Self {
        Self {
            status: QueryStatus::Error,
            data: PromData {
                result_type,
                result: Vec::new(),
            },
        }
    }

    /// A successful range-query response over the given series.
    pub fn matrix(result: Vec<PromSeries>) -> Self {
        Self {
            status: QueryStatus::Success,
            data: PromData {
                result_type: ResultType::Matrix,
                result,
            },
        }
    }

    /// A successful instant-query response over the given series.
    pub fn vector(result: Vec<PromSeries>) -> Self {
        Self {
            status: QueryStatus::Success,
            data: PromData {
                result_type: ResultType::Vector,
                result,
            },
        }
    }

    /// True iff the backend answered with success status.
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }
}
