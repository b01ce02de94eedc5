//! # hostwatch
//!
//! VPS observability dashboard backend. Pulls infrastructure telemetry
//! (host resources, reverse-proxy traffic, container consumption) from a
//! Prometheus backend and code-activity stats from GitHub, and serves the
//! assembled snapshot as JSON to a presentation layer.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         /api/metrics                         │
//! │  ┌────────┐   ┌───────────┐   ┌───────────────┐  ┌────────┐ │
//! │  │ window │──▶│ dashboard │──▶│  transform /  │─▶│  mask  │ │
//! │  │(resolve)│  │ (fan-out) │   │  aggregate    │  │        │ │
//! │  └────────┘   └─────┬─────┘   └───────────────┘  └────────┘ │
//! │                     │                                        │
//! │                     ▼                                        │
//! │            ┌─────────────────┐                               │
//! │            │ MetricsSource / │◀── PromClient | GithubClient  │
//! │            │ ActivitySource  │                               │
//! │            └─────────────────┘                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`window`]**: display-range selector to concrete `(start, end, step)`
//! - **[`client`]** / **[`activity`]**: the Prometheus and GitHub clients;
//!   every failure is absorbed at this boundary and converted to an
//!   empty-but-valid value
//! - **[`dashboard`]**: the concurrent query fan-out and snapshot assembly
//! - **[`transform`]** / **[`aggregate`]**: raw response envelopes to
//!   uniform chart series, multi-series summation
//! - **[`mask`]**: deterministic container-identity masking
//! - **[`server`]**: the thin axum dispatch layer
//!
//! ## Failure model
//!
//! No expected failure crosses a component boundary: a dead backend, a bad
//! credential, or a malformed payload degrades the affected series to empty
//! (or the activity card to its placeholder) while the rest of the snapshot
//! populates normally.

pub mod activity;
pub mod aggregate;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod duration;
pub mod error;
pub mod mask;
pub mod server;
pub mod sources;
pub mod transform;
pub mod window;

// Re-export main types for convenience
pub use activity::GithubClient;
pub use client::PromClient;
pub use config::Settings;
pub use error::QueryError;
pub use mask::mask_name;
pub use sources::{ActivitySource, MetricsSource};
pub use window::{TimeRange, TimeWindow};
