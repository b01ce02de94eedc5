//! Prometheus HTTP API client.
//!
//! One outbound GET per query against `/api/v1/query_range` or
//! `/api/v1/query`, with basic auth attached when a credential pair is
//! configured. Failures never cross this boundary: transport errors, non-2xx
//! statuses, and malformed bodies are logged and converted into the empty
//! error-status envelope, so a dead backend degrades every chart to "no
//! data" instead of failing the request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use hostwatch_types::{PromResponse, ResultType};

use crate::error::QueryError;
use crate::sources::MetricsSource;
use crate::window::TimeWindow;

/// Minimal liveness expression; any backend that can answer it is up.
const HEALTH_QUERY: &str = "up";

/// Client for the Prometheus query API.
#[derive(Debug, Clone)]
pub struct PromClient {
    client: Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl PromClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> PromClientBuilder {
        PromClientBuilder::default()
    }

    /// Evaluate `expr` over a window.
    ///
    /// Never fails: any error is converted to an empty error-status matrix.
    pub async fn query_range(&self, expr: &str, window: &TimeWindow) -> PromResponse {
        match self.try_query_range(expr, window).await {
            Ok(response) => response,
            Err(e) => {
                warn!(query = expr, error = %e, "range query failed");
                PromResponse::empty(ResultType::Matrix)
            }
        }
    }

    /// Evaluate `expr` at the instant `at` (epoch seconds).
    ///
    /// Never fails: any error is converted to an empty error-status vector.
    pub async fn query(&self, expr: &str, at: i64) -> PromResponse {
        match self.try_query(expr, at).await {
            Ok(response) => response,
            Err(e) => {
                warn!(query = expr, error = %e, "instant query failed");
                PromResponse::empty(ResultType::Vector)
            }
        }
    }

    /// Probe backend liveness at the instant `at`.
    pub async fn health(&self, at: i64) -> bool {
        self.query(HEALTH_QUERY, at).await.is_success()
    }

    async fn try_query_range(
        &self,
        expr: &str,
        window: &TimeWindow,
    ) -> Result<PromResponse, QueryError> {
        let url = format!("{}/api/v1/query_range", self.base_url);
        let params = [
            ("query", expr.to_string()),
            ("start", window.start.to_string()),
            ("end", window.end.to_string()),
            ("step", window.step.to_string()),
        ];
        self.fetch(&url, &params).await
    }

    async fn try_query(&self, expr: &str, at: i64) -> Result<PromResponse, QueryError> {
        let url = format!("{}/api/v1/query", self.base_url);
        let params = [("query", expr.to_string()), ("time", at.to_string())];
        self.fetch(&url, &params).await
    }

    async fn fetch(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<PromResponse, QueryError> {
        let mut request = self.client.get(url).query(params);

        // Credentials are attached only when the full pair is configured.
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(QueryError::Auth("Invalid credentials".to_string()));
        }

        if !response.status().is_success() {
            return Err(QueryError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QueryError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MetricsSource for PromClient {
    async fn query_range(&self, expr: &str, window: &TimeWindow) -> PromResponse {
        PromClient::query_range(self, expr, window).await
    }

    async fn query(&self, expr: &str, at: i64) -> PromResponse {
        PromClient::query(self, expr, at).await
    }

    async fn health(&self, at: i64) -> bool {
        PromClient::health(self, at).await
    }
}

/// Builder for PromClient.
#[derive(Debug, Default)]
pub struct PromClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
}

impl PromClientBuilder {
    /// Set the query API base URL (e.g., "http://localhost:9090").
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the basic-auth credential pair. Both halves are required for the
    /// header to be attached; pass `None` for either to disable auth.
    pub fn credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> PromClient {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        PromClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| "http://localhost:9090".to_string())
                .trim_end_matches('/')
                .to_string(),
            username: self.username,
            password: self.password,
        }
    }
}
