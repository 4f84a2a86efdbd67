//! Metrics and observability utilities
//!
//! Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Licitamos metrics
pub const METRICS_PREFIX: &str = "licitamos";

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Pipeline metrics
    describe_counter!(
        format!("{}_bids_moved_total", METRICS_PREFIX),
        Unit::Count,
        "Total pipeline status changes persisted"
    );

    // Backup metrics
    describe_counter!(
        format!("{}_backups_exported_total", METRICS_PREFIX),
        Unit::Count,
        "Total backup exports produced"
    );

    describe_counter!(
        format!("{}_backup_records_imported_total", METRICS_PREFIX),
        Unit::Count,
        "Total records upserted through backup import"
    );

    // External lookup metrics
    describe_counter!(
        format!("{}_lookup_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total external lookup requests issued"
    );

    describe_counter!(
        format!("{}_lookup_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Total external lookup failures"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Record a persisted pipeline status change
pub fn record_bid_moved(status: &str) {
    counter!(
        format!("{}_bids_moved_total", METRICS_PREFIX),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a backup export
pub fn record_backup_exported() {
    counter!(format!("{}_backups_exported_total", METRICS_PREFIX)).increment(1);
}

/// Record records processed during backup import
pub fn record_backup_imported(collection: &str, count: usize) {
    counter!(
        format!("{}_backup_records_imported_total", METRICS_PREFIX),
        "collection" => collection.to_string()
    )
    .increment(count as u64);
}

/// Record an external lookup attempt
pub fn record_lookup(kind: &str, success: bool) {
    counter!(
        format!("{}_lookup_requests_total", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .increment(1);

    if !success {
        counter!(
            format!("{}_lookup_errors_total", METRICS_PREFIX),
            "kind" => kind.to_string()
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("GET", "/v1/bids");
        std::thread::sleep(std::time::Duration::from_millis(10));
        metrics.finish(200);
        // Just verify it runs without panic
    }
}
