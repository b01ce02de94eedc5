//! Multi-series summation.
//!
//! Both strategies assume their input series come from one range query and
//! therefore share the same timestamp grid, so summation is positional
//! (index-aligned). That grid is what Prometheus returns in practice per
//! query, not a guaranteed backend contract.

use hostwatch_types::{ChartPoint, PromResponse, SeriesMap, TitledSeries};

use crate::mask::mask_name;

const CPU_FALLBACK_TITLE: &str = "Docker CPU Load";
const MEM_FALLBACK_TITLE: &str = "Docker Memory";

/// Sum all series of a response into one combined series.
///
/// Walks to the length of the longest series; at each index, sums whatever
/// values are present and carries the timestamp from whichever series
/// supplied one (last wins). An index where no series supplies a timestamp
/// is dropped, so slightly unequal series lengths are tolerated.
pub fn aggregate_metric(response: &PromResponse) -> Vec<ChartPoint> {
    if !response.is_success() || response.data.result.is_empty() {
        return Vec::new();
    }

    let length = response
        .data
        .result
        .iter()
        .map(|series| series.values.len())
        .max()
        .unwrap_or(0);

    let mut combined = Vec::with_capacity(length);
    for index in 0..length {
        let mut sum = 0.0;
        let mut time = None;
        for series in &response.data.result {
            if let Some((timestamp, raw)) = series.values.get(index) {
                if let Ok(value) = raw.parse::<f64>() {
                    if value.is_finite() {
                        sum += value;
                    }
                }
                time = Some(*timestamp);
            }
        }
        if let Some(timestamp) = time {
            combined.push(ChartPoint::new((timestamp * 1000.0) as i64, sum));
        }
    }

    combined
}

/// Combine per-container CPU and memory maps into the two displayed series.
///
/// With no selection, sums every container by index, walking the timestamps
/// of the first CPU entry. A selection is a masked display name: it is
/// resolved back to its raw key by masking each discovered name, and that
/// container's own series pass through unmodified under selection titles.
/// An unresolvable selection falls back to the aggregate.
pub fn combine_containers(
    cpu: &SeriesMap,
    memory: &SeriesMap,
    container_names: &[String],
    selection: Option<&str>,
) -> (TitledSeries, TitledSeries) {
    if let Some(display) = selection {
        if let Some(raw) = container_names.iter().find(|name| mask_name(name) == display) {
            return (
                TitledSeries {
                    title: format!("CPU: {display}"),
                    points: cpu.get(raw).cloned().unwrap_or_default(),
                },
                TitledSeries {
                    title: format!("MEM: {display}"),
                    points: memory.get(raw).cloned().unwrap_or_default(),
                },
            );
        }
    }

    let Some(first) = cpu.values().next() else {
        return (
            TitledSeries::empty(CPU_FALLBACK_TITLE),
            TitledSeries::empty(MEM_FALLBACK_TITLE),
        );
    };

    let mut combined_cpu = Vec::with_capacity(first.len());
    let mut combined_mem = Vec::with_capacity(first.len());
    for (index, point) in first.iter().enumerate() {
        let mut cpu_sum = 0.0;
        let mut mem_sum = 0.0;
        for series in cpu.values() {
            if let Some(p) = series.get(index) {
                cpu_sum += p.value;
            }
        }
        for series in memory.values() {
            if let Some(p) = series.get(index) {
                mem_sum += p.value;
            }
        }
        combined_cpu.push(ChartPoint::new(point.time, cpu_sum));
        combined_mem.push(ChartPoint::new(point.time, mem_sum));
    }

    (
        TitledSeries {
            title: CPU_FALLBACK_TITLE.to_string(),
            points: combined_cpu,
        },
        TitledSeries {
            title: MEM_FALLBACK_TITLE.to_string(),
            points: combined_mem,
        },
    )
}
