//! Container identity masking.
//!
//! Raw container names can leak deployment details (customer names, internal
//! project codes), so every identifier is mapped to a display-safe label
//! before it leaves the pipeline. Known infrastructure services keep a
//! friendly name; everything else gets a deterministic synthetic identifier.

use hostwatch_types::SeriesMap;

/// Known-safe service-name fragments and their display labels.
/// First match wins, so order matters.
const SAFE_SERVICES: &[(&str, &str)] = &[
    ("odoo", "Odoo ERP Core"),
    ("wordpress", "WordPress Store"),
    ("traefik", "Traefik Proxy"),
    ("portainer", "Portainer Mgmt"),
    ("grafana", "Grafana Dashboards"),
    ("prometheus", "Prometheus DB"),
    ("cadvisor", "Container Advisor"),
    ("node-exporter", "Node Metrics"),
    ("loki", "Loki Logs"),
    ("postgres", "PostgreSQL DB"),
    ("redis", "Redis Cache"),
    ("minio", "Object Storage"),
    ("seaweedfs", "SeaweedFS"),
];

/// Map a raw container name to its display-safe label.
///
/// Pure and deterministic: the same input yields the same output within a
/// run and across restarts. Names containing an allow-listed fragment
/// (case-insensitive) return that service's friendly label; all others get a
/// synthetic identifier derived from the character-code sum of the name.
///
/// The synthetic space has only 65,536 buckets, so unrelated names can
/// collide once the fleet grows into the low hundreds of masked containers.
pub fn mask_name(name: &str) -> String {
    let lower = name.to_lowercase();

    for (fragment, label) in SAFE_SERVICES {
        if lower.contains(fragment) {
            return (*label).to_string();
        }
    }

    let sum: i64 = name.chars().map(|c| c as i64).sum();
    let hex = format!("{:04X}", (sum * 31).abs());
    format!("SECURE-MODULE-0x{}", &hex[..4])
}

/// Re-key a per-container series map by masked display name.
///
/// Two raw names masking to the same label collapse into one entry (the
/// later key wins), matching the collision bound documented on [`mask_name`].
pub fn mask_series_keys(map: SeriesMap) -> SeriesMap {
    map.into_iter()
        .map(|(name, points)| (mask_name(&name), points))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostwatch_types::ChartPoint;

    #[test]
    fn test_mask_is_deterministic() {
        for name in ["db-internal-7", "client-acme-api", "", "Odoo-worker-1"] {
            let first = mask_name(name);
            for _ in 0..10 {
                assert_eq!(mask_name(name), first);
            }
        }
    }

    #[test]
    fn test_allow_listed_fragment_matches_any_case() {
        assert_eq!(mask_name("Odoo-worker-1"), "Odoo ERP Core");
        assert_eq!(mask_name("ODOO"), "Odoo ERP Core");
        assert_eq!(mask_name("my-wordpress-shop"), "WordPress Store");
        assert_eq!(mask_name("traefik"), "Traefik Proxy");
        assert_eq!(mask_name("stack_node-exporter_1"), "Node Metrics");
    }

    #[test]
    fn test_first_table_match_wins() {
        // Contains both "odoo" and "postgres"; the table lists odoo first.
        assert_eq!(mask_name("odoo-postgres-sidecar"), "Odoo ERP Core");
    }

    #[test]
    fn test_synthetic_identifier_format() {
        let masked = mask_name("client-acme-api");
        assert!(masked.starts_with("SECURE-MODULE-0x"), "{masked}");
        let digits = masked.strip_prefix("SECURE-MODULE-0x").unwrap();
        assert_eq!(digits.len(), 4);
        assert!(digits.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digits, digits.to_uppercase());
    }

    #[test]
    fn test_synthetic_identifier_value() {
        // "ab" -> (97 + 98) * 31 = 6045 = 0x179D
        assert_eq!(mask_name("ab"), "SECURE-MODULE-0x179D");
    }

    #[test]
    fn test_empty_name_pads_to_four_digits() {
        assert_eq!(mask_name(""), "SECURE-MODULE-0x0000");
    }

    #[test]
    fn test_mask_series_keys() {
        let mut map = SeriesMap::new();
        map.insert("odoo-web".to_string(), vec![ChartPoint::new(1, 1.0)]);
        map.insert("client-acme-api".to_string(), vec![ChartPoint::new(1, 2.0)]);

        let masked = mask_series_keys(map);
        assert_eq!(masked.len(), 2);
        assert!(masked.contains_key("Odoo ERP Core"));
        assert!(masked.keys().any(|k| k.starts_with("SECURE-MODULE-0x")));
    }
}
