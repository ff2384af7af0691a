//! Prometheus metrics for the workload generator.

use anyhow::Result;
use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

lazy_static! {
    /// Registry for all generator-tier metrics.
    pub static ref REGISTRY: Registry = Registry::new();

    /// Forwarded compile requests by outcome
    /// (success, timeout, downstream, transport).
    pub static ref COMPILE_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("compile_requests_total", "Forwarded compile requests by outcome"),
        &["result"]
    ).expect("Failed to create COMPILE_REQUESTS_TOTAL metric");

    /// Generator-observed duration of forwarded compile requests.
    pub static ref COMPILE_REQUEST_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "compile_request_duration_seconds",
            "Duration of forwarded compile requests in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0]),
    ).expect("Failed to create COMPILE_REQUEST_DURATION metric");

    /// API requests by endpoint.
    pub static ref REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("http_requests_total", "Total API requests"),
        &["endpoint"]
    ).expect("Failed to create REQUESTS_TOTAL metric");
}

/// Register all metrics with the registry. Called once at startup.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(COMPILE_REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(COMPILE_REQUEST_DURATION.clone()))?;
    REGISTRY.register(Box::new(REQUESTS_TOTAL.clone()))?;
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record a forwarded compile outcome.
pub fn inc_compile_request(result: &str) {
    COMPILE_REQUESTS_TOTAL.with_label_values(&[result]).inc();
}

/// Record an API request.
pub fn inc_requests(endpoint: &str) {
    REQUESTS_TOTAL.with_label_values(&[endpoint]).inc();
}
