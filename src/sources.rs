//! Data source seams for the fan-out.
//!
//! The fan-out talks to its collaborators through these traits so tests can
//! drive it with in-memory fakes. Implementations must never fail outward:
//! every method resolves to a valid value even when the collaborator is
//! unreachable.

use async_trait::async_trait;
use hostwatch_types::{ContributionCalendar, PromResponse};

use crate::window::TimeWindow;

/// A range/instant query backend (Prometheus in production).
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Evaluate `expr` over a window. Soft-failures yield an empty
    /// error-status envelope.
    async fn query_range(&self, expr: &str, window: &TimeWindow) -> PromResponse;

    /// Evaluate `expr` at a single instant.
    async fn query(&self, expr: &str, at: i64) -> PromResponse;

    /// Backend liveness at the given instant. Any failure is `false`.
    async fn health(&self, at: i64) -> bool;
}

/// A code-contribution activity source (GitHub in production).
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Fetch the contribution calendar for a user. Any failure yields the
    /// deterministic placeholder calendar, never an error.
    async fn contributions(&self, user: &str) -> ContributionCalendar;
}
