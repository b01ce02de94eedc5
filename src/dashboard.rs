//! Query fan-out and snapshot assembly.
//!
//! One fan-out round issues every dashboard query concurrently, waits for
//! all members to settle, and assembles the snapshot. Each member resolves
//! to a value on failure (empty envelope, `false`, placeholder calendar),
//! so one dead collaborator never takes down the round; total backend
//! unavailability degrades every series to empty instead of failing the
//! response.

use tokio::join;

use hostwatch_types::{
    ContainerList, ContainerMetrics, DashboardSnapshot, ProxyMetrics, SystemMetrics,
};

use crate::aggregate::combine_containers;
use crate::mask::{mask_name, mask_series_keys};
use crate::sources::{ActivitySource, MetricsSource};
use crate::transform::{series_key, transform_metric, transform_metric_map};
use crate::window::TimeWindow;

// System (node-exporter)
const CPU_QUERY: &str =
    r#"100 - (avg by (instance) (rate(node_cpu_seconds_total{mode="idle"}[5m])) * 100)"#;
const RAM_QUERY: &str = r#"((node_memory_MemTotal_bytes - node_memory_MemAvailable_bytes) / node_memory_MemTotal_bytes) * 100"#;
const DISK_QUERY: &str = r#"100 - ((node_filesystem_avail_bytes{mountpoint="/",fstype!="rootfs"} / node_filesystem_size_bytes{mountpoint="/",fstype!="rootfs"}) * 100)"#;

// Reverse proxy (Traefik entrypoints)
const REQUESTS_QUERY: &str = r#"sum(rate(traefik_entrypoint_requests_total[5m]))"#;
const CONNECTIONS_QUERY: &str = r#"sum(traefik_open_connections)"#;
const ERRORS_QUERY: &str = r#"sum(rate(traefik_entrypoint_requests_total{code=~"5.."}[5m]))"#;

// Containers (cAdvisor), one series per container
const CONTAINER_CPU_QUERY: &str =
    r#"rate(container_cpu_usage_seconds_total{image!=""}[5m]) * 100"#;
const CONTAINER_MEM_QUERY: &str =
    r#"container_memory_usage_bytes{image!=""} / 1024 / 1024 / 1024"#;
const CONTAINER_COUNT_QUERY: &str = r#"count(container_last_seen{image!=""})"#;
/// Instant discovery query; only the label sets are consumed.
const CONTAINER_DISCOVERY_QUERY: &str = r#"container_last_seen{image!=""}"#;

/// Named services surfaced individually on the dashboard. The regex match
/// catches naming variations like `odoo@docker` or `odoo-svc`.
const SERVICES: &[&str] = &["odoo", "wordpress", "portainer"];

fn service_query(name: &str) -> String {
    format!(r#"sum(rate(traefik_service_requests_total{{service=~".*{name}.*"}}[5m]))"#)
}

/// Execute one full fan-out round and assemble the snapshot.
///
/// All members run concurrently with no shared mutable state; the `join!`
/// is the wait-for-all barrier. Each member is bounded by its client's own
/// transport timeout. `selection`, when present, is a masked container
/// display name narrowing the combined container charts.
pub async fn fetch(
    metrics: &dyn MetricsSource,
    activity: &dyn ActivitySource,
    user: &str,
    window: &TimeWindow,
    selection: Option<&str>,
) -> DashboardSnapshot {
    let (odoo_query, wordpress_query, portainer_query) = (
        service_query(SERVICES[0]),
        service_query(SERVICES[1]),
        service_query(SERVICES[2]),
    );

    let (
        cpu,
        ram,
        disk,
        requests,
        connections,
        errors,
        container_cpu,
        container_mem,
        container_count,
        container_discovery,
        odoo,
        wordpress,
        portainer,
        calendar,
        is_online,
    ) = join!(
        metrics.query_range(CPU_QUERY, window),
        metrics.query_range(RAM_QUERY, window),
        metrics.query_range(DISK_QUERY, window),
        metrics.query_range(REQUESTS_QUERY, window),
        metrics.query_range(CONNECTIONS_QUERY, window),
        metrics.query_range(ERRORS_QUERY, window),
        metrics.query_range(CONTAINER_CPU_QUERY, window),
        metrics.query_range(CONTAINER_MEM_QUERY, window),
        metrics.query_range(CONTAINER_COUNT_QUERY, window),
        metrics.query(CONTAINER_DISCOVERY_QUERY, window.end),
        metrics.query_range(&odoo_query, window),
        metrics.query_range(&wordpress_query, window),
        metrics.query_range(&portainer_query, window),
        activity.contributions(user),
        metrics.health(window.end),
    );

    // Per-container breakdowns, keyed by raw name until masking below.
    let cpu_map = transform_metric_map(&container_cpu, "name");
    let mem_map = transform_metric_map(&container_mem, "name");

    let container_names: Vec<String> = if container_discovery.is_success() {
        container_discovery
            .data
            .result
            .iter()
            .map(|series| series_key(series, "name"))
            .collect()
    } else {
        Vec::new()
    };

    let (combined_cpu, combined_mem) =
        combine_containers(&cpu_map, &mem_map, &container_names, selection);

    let services = SERVICES
        .iter()
        .zip([&odoo, &wordpress, &portainer])
        .map(|(name, response)| (name.to_string(), transform_metric(response)))
        .collect();

    DashboardSnapshot {
        system: SystemMetrics {
            cpu: transform_metric(&cpu),
            ram: transform_metric(&ram),
            disk: transform_metric(&disk),
            is_online,
        },
        proxy: ProxyMetrics {
            requests: transform_metric(&requests),
            connections: transform_metric(&connections),
            errors: transform_metric(&errors),
        },
        containers: ContainerMetrics {
            cpu: combined_cpu,
            memory: combined_mem,
            count_series: transform_metric(&container_count),
            cpu_by_container: mask_series_keys(cpu_map),
            memory_by_container: mask_series_keys(mem_map),
        },
        services,
        container_list: ContainerList {
            count: container_names.len(),
            list: container_names.iter().map(|name| mask_name(name)).collect(),
        },
        activity: calendar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hostwatch_types::{ContributionCalendar, PromResponse, PromSeries, ResultType};

    use crate::window::TimeRange;

    /// Fake backend: returns canned data for every query except `fail_expr`,
    /// which soft-fails the way the real client does.
    struct ScriptedSource {
        fail_expr: &'static str,
    }

    #[async_trait]
    impl MetricsSource for ScriptedSource {
        async fn query_range(&self, expr: &str, _window: &TimeWindow) -> PromResponse {
            if expr == self.fail_expr {
                return PromResponse::empty(ResultType::Matrix);
            }
            if expr == CONTAINER_CPU_QUERY || expr == CONTAINER_MEM_QUERY {
                return PromResponse::matrix(vec![
                    PromSeries::new()
                        .with_label("name", "odoo-web")
                        .with_value(100.0, "1.0")
                        .with_value(160.0, "2.0"),
                    PromSeries::new()
                        .with_label("name", "client-acme-api")
                        .with_value(100.0, "3.0")
                        .with_value(160.0, "4.0"),
                ]);
            }
            PromResponse::matrix(vec![PromSeries::new()
                .with_value(100.0, "10.0")
                .with_value(160.0, "20.0")])
        }

        async fn query(&self, _expr: &str, _at: i64) -> PromResponse {
            PromResponse::vector(vec![
                PromSeries::new().with_label("name", "odoo-web"),
                PromSeries::new().with_label("name", "client-acme-api"),
                PromSeries::new().with_label("image", "ghost:5"),
            ])
        }

        async fn health(&self, _at: i64) -> bool {
            true
        }
    }

    struct StubActivity;

    #[async_trait]
    impl ActivitySource for StubActivity {
        async fn contributions(&self, _user: &str) -> ContributionCalendar {
            ContributionCalendar {
                total_contributions: 7,
                weeks: Vec::new(),
            }
        }
    }

    #[tokio::test]
    async fn test_one_failing_member_is_isolated() {
        let metrics = ScriptedSource {
            fail_expr: RAM_QUERY,
        };
        let window = TimeRange::OneHour.window(1_000_000);

        let snapshot = fetch(&metrics, &StubActivity, "someone", &window, None).await;

        // The failing member degrades to empty; everything else is populated.
        assert!(snapshot.system.ram.is_empty());
        assert_eq!(snapshot.system.cpu.len(), 2);
        assert_eq!(snapshot.system.disk.len(), 2);
        assert_eq!(snapshot.proxy.requests.len(), 2);
        assert_eq!(snapshot.proxy.connections.len(), 2);
        assert_eq!(snapshot.proxy.errors.len(), 2);
        assert!(snapshot.system.is_online);
        assert_eq!(snapshot.activity.total_contributions, 7);
    }

    #[tokio::test]
    async fn test_snapshot_masks_container_identities() {
        let metrics = ScriptedSource { fail_expr: "" };
        let window = TimeRange::OneHour.window(1_000_000);

        let snapshot = fetch(&metrics, &StubActivity, "someone", &window, None).await;

        assert_eq!(snapshot.container_list.count, 3);
        assert!(snapshot
            .container_list
            .list
            .contains(&"Odoo ERP Core".to_string()));
        // Raw names never appear in the snapshot.
        for key in snapshot
            .containers
            .cpu_by_container
            .keys()
            .chain(snapshot.container_list.list.iter())
        {
            assert_ne!(key, "odoo-web");
            assert_ne!(key, "client-acme-api");
        }
        assert!(snapshot
            .containers
            .cpu_by_container
            .contains_key("Odoo ERP Core"));
    }

    #[tokio::test]
    async fn test_snapshot_aggregates_containers_without_selection() {
        let metrics = ScriptedSource { fail_expr: "" };
        let window = TimeRange::OneHour.window(1_000_000);

        let snapshot = fetch(&metrics, &StubActivity, "someone", &window, None).await;

        assert_eq!(snapshot.containers.cpu.title, "Docker CPU Load");
        assert_eq!(snapshot.containers.cpu.points.len(), 2);
        assert_eq!(snapshot.containers.cpu.points[0].value, 4.0);
        assert_eq!(snapshot.containers.cpu.points[1].value, 6.0);
    }

    #[tokio::test]
    async fn test_snapshot_honors_container_selection() {
        let metrics = ScriptedSource { fail_expr: "" };
        let window = TimeRange::OneHour.window(1_000_000);

        let snapshot = fetch(
            &metrics,
            &StubActivity,
            "someone",
            &window,
            Some("Odoo ERP Core"),
        )
        .await;

        assert_eq!(snapshot.containers.cpu.title, "CPU: Odoo ERP Core");
        assert_eq!(snapshot.containers.memory.title, "MEM: Odoo ERP Core");
        assert_eq!(snapshot.containers.cpu.points[0].value, 1.0);
        assert_eq!(snapshot.containers.cpu.points[1].value, 2.0);
    }

    #[tokio::test]
    async fn test_services_group_is_keyed_by_service_name() {
        let metrics = ScriptedSource { fail_expr: "" };
        let window = TimeRange::OneHour.window(1_000_000);

        let snapshot = fetch(&metrics, &StubActivity, "someone", &window, None).await;

        assert_eq!(snapshot.services.len(), 3);
        for name in ["odoo", "wordpress", "portainer"] {
            assert_eq!(snapshot.services[name].len(), 2, "service {name}");
        }
    }

    #[tokio::test]
    async fn test_discovery_failure_empties_the_list_only() {
        struct DeadDiscovery;

        #[async_trait]
        impl MetricsSource for DeadDiscovery {
            async fn query_range(&self, _expr: &str, _window: &TimeWindow) -> PromResponse {
                PromResponse::matrix(vec![PromSeries::new().with_value(100.0, "1.0")])
            }
            async fn query(&self, _expr: &str, _at: i64) -> PromResponse {
                PromResponse::empty(ResultType::Vector)
            }
            async fn health(&self, _at: i64) -> bool {
                false
            }
        }

        let window = TimeRange::OneHour.window(1_000_000);
        let snapshot = fetch(&DeadDiscovery, &StubActivity, "someone", &window, None).await;

        assert_eq!(snapshot.container_list.count, 0);
        assert!(snapshot.container_list.list.is_empty());
        assert!(!snapshot.system.is_online);
        assert_eq!(snapshot.system.cpu.len(), 1);
    }
}
