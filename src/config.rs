//! Process configuration.
//!
//! Settings are resolved once at startup (defaults, then an optional file,
//! then environment variables) and passed by reference into the clients.
//! Nothing inside the pipeline reads ambient environment state.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Resolved process settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Prometheus query API base URL.
    pub prometheus_url: String,
    /// Basic-auth credentials for Prometheus; auth is attached only when
    /// both halves are present.
    pub prometheus_username: Option<String>,
    pub prometheus_password: Option<String>,
    /// GitHub API token; without it the activity card shows placeholder data.
    pub github_token: Option<String>,
    /// GitHub login whose contributions are displayed.
    pub github_user: String,
    /// Dashboard endpoint bind address.
    pub listen_addr: String,
}

impl Settings {
    /// Load settings: defaults, then `path` (if given), then environment
    /// variables (`PROMETHEUS_URL`, `PROMETHEUS_USERNAME`,
    /// `PROMETHEUS_PASSWORD`, `GITHUB_TOKEN`, `GITHUB_USER`, `LISTEN_ADDR`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("prometheus_url", "http://localhost:9090")?
            .set_default("github_user", "octocat")?
            .set_default("listen_addr", "0.0.0.0:3001")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }
}
