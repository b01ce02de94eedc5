//! The assembled dashboard snapshot.
//!
//! One snapshot is built per display request from a single fan-out round. It
//! is immutable once returned and serialized straight to the presentation
//! layer; container identities inside it are already masked.

use crate::{ChartPoint, ContributionCalendar, SeriesMap};
use std::collections::BTreeMap;

/// A chart series paired with its display title.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TitledSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl TitledSeries {
    /// An empty series with the given title.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            points: Vec::new(),
        }
    }
}

/// Host-level resource usage from node-exporter.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SystemMetrics {
    pub cpu: Vec<ChartPoint>,
    pub ram: Vec<ChartPoint>,
    pub disk: Vec<ChartPoint>,
    /// Result of the backend liveness probe for this round.
    pub is_online: bool,
}

/// Reverse-proxy traffic from the Traefik entrypoints.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProxyMetrics {
    pub requests: Vec<ChartPoint>,
    pub connections: Vec<ChartPoint>,
    pub errors: Vec<ChartPoint>,
}

/// Container resource consumption from cAdvisor.
///
/// `cpu`/`memory` are the selection-aware combined series; the `*_by_container`
/// maps carry the per-container breakdowns keyed by masked display name.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContainerMetrics {
    pub cpu: TitledSeries,
    pub memory: TitledSeries,
    pub count_series: Vec<ChartPoint>,
    pub cpu_by_container: SeriesMap,
    pub memory_by_container: SeriesMap,
}

/// Discovered containers, masked for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContainerList {
    pub count: usize,
    pub list: Vec<String>,
}

/// The aggregate result of one fan-out round.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DashboardSnapshot {
    pub system: SystemMetrics,
    pub proxy: ProxyMetrics,
    pub containers: ContainerMetrics,
    /// Request-rate series for the named core services.
    pub services: BTreeMap<String, Vec<ChartPoint>>,
    pub container_list: ContainerList,
    pub activity: ContributionCalendar,
}
