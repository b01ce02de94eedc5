//! The canonical chart unit consumed by every dashboard widget.

use std::collections::BTreeMap;

/// A single sample on a chart: epoch-millisecond timestamp and value.
///
/// Prometheus reports epoch seconds and string values; the transformer
/// converts both so consumers never deal with the raw wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartPoint {
    /// Sample time in epoch milliseconds.
    pub time: i64,
    /// Sample value.
    pub value: f64,
}

impl ChartPoint {
    /// Create a new chart point.
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Per-resource chart series, keyed by a stable resource identity.
///
/// Insertion order is irrelevant; `BTreeMap` keeps iteration (and therefore
/// serialization) deterministic.
pub type SeriesMap = BTreeMap<String, Vec<ChartPoint>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_construction() {
        let p = ChartPoint::new(1_000_000_000, 42.5);
        assert_eq!(p.time, 1_000_000_000);
        assert_eq!(p.value, 42.5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_point_serialization() {
        let p = ChartPoint::new(1700000000000, 1.5);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"time":1700000000000,"value":1.5}"#);

        let back: ChartPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
