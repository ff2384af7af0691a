//! Prometheus metrics for the compile simulator.

use anyhow::Result;
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Registry for all simulator-tier metrics.
    pub static ref REGISTRY: Registry = Registry::new();

    /// End-to-end compile time, the harness's primary output signal.
    pub static ref COMPILE_TIME: Histogram = Histogram::with_opts(
        HistogramOpts::new("compile_time_seconds", "End to end compile time in seconds")
            .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0]),
    ).expect("Failed to create COMPILE_TIME metric");

    /// Completed compiles by result.
    pub static ref COMPILES_TOTAL: CounterVec = CounterVec::new(
        Opts::new("compiles_total", "Total simulated compiles"),
        &["result"]
    ).expect("Failed to create COMPILES_TOTAL metric");

    /// API requests by endpoint.
    pub static ref REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("http_requests_total", "Total API requests"),
        &["endpoint"]
    ).expect("Failed to create REQUESTS_TOTAL metric");
}

/// Register all metrics with the registry. Called once at startup;
/// re-registration (e.g. in tests) is not an error worth failing on.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(COMPILE_TIME.clone()))?;
    REGISTRY.register(Box::new(COMPILES_TOTAL.clone()))?;
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

/// Record a completed compile.
pub fn inc_compile(result: &str) {
    COMPILES_TOTAL.with_label_values(&[result]).inc();
}

/// Record an API request.
pub fn inc_requests(endpoint: &str) {
    REQUESTS_TOTAL.with_label_values(&[endpoint]).inc();
}
