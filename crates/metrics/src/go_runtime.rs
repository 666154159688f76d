use serde::Serialize;

use crate::prometheus::MetricSet;

/// Headline gauges of a Go service's runtime, as exported by
/// `client_golang`'s default collectors. Missing series read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GoRuntimeSnapshot {
    pub goroutines: f64,
    pub heap_alloc_bytes: f64,
    pub heap_inuse_bytes: f64,
    pub stack_inuse_bytes: f64,
    pub alloc_bytes: f64,
    pub heap_objects: f64,
    /// Fraction of CPU time spent in GC, `0.0..=1.0`.
    pub gc_cpu_fraction: f64,
}

impl GoRuntimeSnapshot {
    pub fn from_metrics(metrics: &MetricSet) -> Self {
        Self {
            goroutines: metrics.value_or_zero("go_goroutines"),
            heap_alloc_bytes: metrics.value_or_zero("go_memstats_heap_alloc_bytes"),
            heap_inuse_bytes: metrics.value_or_zero("go_memstats_heap_inuse_bytes"),
            stack_inuse_bytes: metrics.value_or_zero("go_memstats_stack_inuse_bytes"),
            alloc_bytes: metrics.value_or_zero("go_memstats_alloc_bytes"),
            heap_objects: metrics.value_or_zero("go_memstats_heap_objects"),
            gc_cpu_fraction: metrics.value_or_zero("go_gc_cpu_fraction"),
        }
    }
}

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size with 1024 steps and at most two decimals, e.g. `4 MB`.
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_string();
    }
    let exp = (bytes.ln() / 1024f64.ln()).floor().clamp(0.0, (BYTE_UNITS.len() - 1) as f64);
    let scaled = bytes / 1024f64.powf(exp);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, BYTE_UNITS[exp as usize])
}
