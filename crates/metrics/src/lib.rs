//! Backend health metrics for the admin client.
//!
//! The API-check proxy returns a target service's Prometheus text exposition;
//! this crate fetches it once and parses it into samples. There is no polling.

pub mod api_check;
pub mod error;
pub mod go_runtime;
pub mod prometheus;

pub use api_check::ApiCheckClient;
pub use error::MetricsError;
pub use go_runtime::{GoRuntimeSnapshot, format_bytes};
pub use prometheus::{MetricSet, MetricType, Sample, Unit, parse};
