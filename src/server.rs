//! Dashboard data endpoint.
//!
//! Thin dispatch over the pipeline: handlers resolve the window, run the
//! fan-out, and serialize the snapshot. No processing logic lives here.
//! Dropping a request (client disconnect) drops the handler future and with
//! it every in-flight member query.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use hostwatch_types::{ContributionCalendar, DashboardSnapshot};

use crate::activity::GithubClient;
use crate::client::PromClient;
use crate::config::Settings;
use crate::dashboard;
use crate::window::TimeRange;

/// Shared server state, constructed once at startup.
pub struct AppState {
    pub settings: Settings,
    pub prometheus: PromClient,
    pub github: GithubClient,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/metrics", get(metrics))
        .route("/api/activity", get(activity))
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct MetricsParams {
    range: Option<String>,
    /// Masked display name narrowing the container charts.
    container: Option<String>,
}

async fn metrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MetricsParams>,
) -> Json<DashboardSnapshot> {
    let range = TimeRange::from_selector(params.range.as_deref().unwrap_or_default());
    // Captured once: window bound and instant-query timestamp agree.
    let window = range.window(Utc::now().timestamp());
    debug!(range = range.selector(), start = window.start, end = window.end, "dashboard request");

    let snapshot = dashboard::fetch(
        &state.prometheus,
        &state.github,
        &state.settings.github_user,
        &window,
        params.container.as_deref(),
    )
    .await;

    Json(snapshot)
}

#[derive(Debug, Deserialize)]
struct ActivityParams {
    user: Option<String>,
}

async fn activity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivityParams>,
) -> Json<ContributionCalendar> {
    let user = params
        .user
        .unwrap_or_else(|| state.settings.github_user.clone());
    Json(state.github.contributions(&user).await)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}
