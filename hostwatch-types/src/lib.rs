//! # hostwatch-types
//!
//! Wire schema for the hostwatch dashboard. This crate defines the types that
//! flow between the metrics pipeline and its consumers: the Prometheus
//! response envelope as it arrives off the wire, the uniform chart series the
//! rest of the system works with, the GitHub contribution calendar, and the
//! assembled dashboard snapshot.
//!
//! ## Design Goals
//!
//! - **Plain data**: structs and enums with no behavior beyond small helpers
//!   and constructors; all processing lives in the `hostwatch` crate
//! - **Optional serialization**: enable the `serde` feature to derive
//!   `Serialize`/`Deserialize` on every type (camelCase on the wire)
//! - **Stable ordering**: keyed collections are `BTreeMap`s so serialized
//!   output is deterministic
//!
//! ## Features
//!
//! - `serde`: JSON serialization via serde

mod activity;
mod dashboard;
mod point;
mod query;

pub use activity::*;
pub use dashboard::*;
pub use point::*;
pub use query::*;
