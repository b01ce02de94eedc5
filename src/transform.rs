//! Raw query responses to uniform chart series.
//!
//! Everything downstream of the clients works in [`ChartPoint`]s; these
//! functions are the only place the Prometheus wire shape is interpreted.
//! Error-status or empty input always yields an empty structure, never an
//! error.

use hostwatch_types::{ChartPoint, PromResponse, PromSeries, SeriesMap};

/// Convert a response holding one logical metric into a single series.
///
/// When the backend returns multiple series (e.g. several instances), only
/// the first is used. This is a deliberate simplification for aggregate
/// host-level metrics, not a bug to fix.
pub fn transform_metric(response: &PromResponse) -> Vec<ChartPoint> {
    if !response.is_success() {
        return Vec::new();
    }
    match response.data.result.first() {
        Some(series) => convert_values(&series.values),
        None => Vec::new(),
    }
}

/// Convert a response carrying one series per resource into a keyed map.
///
/// Keys come from the `label` label, falling back to `image`, falling back
/// to `"Unknown"`. Empty label values count as missing.
pub fn transform_metric_map(response: &PromResponse, label: &str) -> SeriesMap {
    if !response.is_success() {
        return SeriesMap::new();
    }

    response
        .data
        .result
        .iter()
        .map(|series| (series_key(series, label), convert_values(&series.values)))
        .collect()
}

/// Resolve the display key for a series: `label`, then `image`, then "Unknown".
pub fn series_key(series: &PromSeries, label: &str) -> String {
    series
        .metric
        .get(label)
        .filter(|v| !v.is_empty())
        .or_else(|| series.metric.get("image").filter(|v| !v.is_empty()))
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Convert raw `(epoch-seconds, value-string)` pairs to chart points.
///
/// A value that fails to parse, or parses to NaN/infinity, skips that point
/// rather than aborting the series.
fn convert_values(values: &[(f64, String)]) -> Vec<ChartPoint> {
    values
        .iter()
        .filter_map(|(timestamp, raw)| {
            let value = raw.parse::<f64>().ok()?;
            value
                .is_finite()
                .then(|| ChartPoint::new((timestamp * 1000.0) as i64, value))
        })
        .collect()
}
