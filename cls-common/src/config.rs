//! Workload simulation parameters.
//!
//! Read once from the environment at startup and passed into the
//! simulation components; never consulted from ambient process state
//! inside the hot path.

use crate::env;

/// Default cost factor of one key-derivation round.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Default mean simulated work rate, in milliseconds per document byte.
pub const DEFAULT_WORK_RATE_MS: f64 = 5.0;

/// Default standard deviation of the work rate, in milliseconds per
/// document byte.
pub const DEFAULT_WORK_SD_MS: f64 = 1.2;

/// Default upper bound on generated document length.
pub const DEFAULT_MAX_DOC_LEN: usize = 1000;

/// Process-wide workload parameters, immutable after startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkParams {
    /// PBKDF2 iteration count per busy-work round. Always >= 1.
    pub iterations: u32,

    /// Mean work rate in linear space, ms per document byte. Always > 0.
    pub work_rate_ms: f64,

    /// Standard deviation of the work rate in linear space, ms per
    /// document byte. Always >= 0.
    pub work_sd_ms: f64,

    /// Upper bound on generated document length, bytes. Always >= 1.
    /// Keeps simulated durations finite and testable.
    pub max_doc_len: usize,
}

impl Default for WorkParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            work_rate_ms: DEFAULT_WORK_RATE_MS,
            work_sd_ms: DEFAULT_WORK_SD_MS,
            max_doc_len: DEFAULT_MAX_DOC_LEN,
        }
    }
}

impl WorkParams {
    /// Load parameters from `COMPILE_ITERATIONS`, `COMPILE_WORK_RATE`,
    /// `COMPILE_WORK_SD`, and `DOC_LENGTH`. Invalid or missing values
    /// fall back to the defaults rather than failing startup.
    pub fn from_env() -> Self {
        let iterations = env::var_or_min("COMPILE_ITERATIONS", DEFAULT_ITERATIONS, 1);
        let max_doc_len = env::var_or_min("DOC_LENGTH", DEFAULT_MAX_DOC_LEN, 1);

        let mut work_rate_ms = env::var_or("COMPILE_WORK_RATE", DEFAULT_WORK_RATE_MS);
        if !(work_rate_ms > 0.0) || !work_rate_ms.is_finite() {
            tracing::warn!(
                value = work_rate_ms,
                default = DEFAULT_WORK_RATE_MS,
                "COMPILE_WORK_RATE must be positive, using default"
            );
            work_rate_ms = DEFAULT_WORK_RATE_MS;
        }

        let mut work_sd_ms = env::var_or("COMPILE_WORK_SD", DEFAULT_WORK_SD_MS);
        if !(work_sd_ms >= 0.0) || !work_sd_ms.is_finite() {
            tracing::warn!(
                value = work_sd_ms,
                default = DEFAULT_WORK_SD_MS,
                "COMPILE_WORK_SD must be non-negative, using default"
            );
            work_sd_ms = DEFAULT_WORK_SD_MS;
        }

        Self {
            iterations,
            work_rate_ms,
            work_sd_ms,
            max_doc_len,
        }
    }
}
