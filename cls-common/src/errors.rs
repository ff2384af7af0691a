//! Error taxonomy for the forwarding and simulation layers.
//!
//! All of these are caught at the HTTP boundary and mapped to a
//! response status; none are retried automatically. The harness exists
//! to expose real failure rates, not mask them.

use thiserror::Error;

/// Failure modes of a forwarded downstream request.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// No response arrived within the caller-supplied deadline.
    #[error("downstream request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The downstream responded with a non-success status.
    #[error("downstream returned status {status}")]
    Downstream { status: u16 },

    /// Connection-level failure below the HTTP layer.
    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl ForwardError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ForwardError::Timeout { .. })
    }
}

/// Failure inside the simulated compile itself. Never expected in
/// normal operation; treated as fatal for the request.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The key-derivation primitive rejected its parameters.
    #[error("busy-work derivation failed: {0}")]
    BusyWork(String),

    /// The blocking worker task panicked or was aborted.
    #[error("busy-work task failed: {0}")]
    Task(String),
}
