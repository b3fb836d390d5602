use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec, TextEncoder,
};

// Metrics registry
static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap()
});

static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.010, 0.050, 0.100, 0.500, 1.0, 5.0]
    )
    .unwrap()
});

static DEPENDENCY_CHECKS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "dependency_health_checks_total",
        "Total number of dependency status checks by outcome",
        &["dependency", "status"]
    )
    .unwrap()
});

static CONTENT_TYPE_CACHE_CLEARS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "content_type_cache_clears_total",
        "Number of times the content type cache was cleared"
    )
    .unwrap()
});

pub struct MetricsRecorder;

impl MetricsRecorder {
    pub fn record_http_request(method: &str, path: &str, status: u16) {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
    }

    pub fn record_http_duration(method: &str, path: &str, duration: f64) {
        HTTP_REQUEST_DURATION
            .with_label_values(&[method, path])
            .observe(duration);
    }

    pub fn record_dependency_check(dependency: &str, status: &str) {
        DEPENDENCY_CHECKS_TOTAL
            .with_label_values(&[dependency, status])
            .inc();
    }

    pub fn record_content_type_cache_clear() {
        CONTENT_TYPE_CACHE_CLEARS_TOTAL.inc();
    }

    /// Export all metrics in Prometheus format
    pub fn export() -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        encoder.encode_to_string(&metric_families)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_recorded_metrics() {
        MetricsRecorder::record_dependency_check("geodb", "error");
        MetricsRecorder::record_content_type_cache_clear();

        let exported = MetricsRecorder::export().unwrap();
        assert!(exported.contains("dependency_health_checks_total"));
        assert!(exported.contains("content_type_cache_clears_total"));
    }
}
