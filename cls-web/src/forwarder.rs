//! Downstream request forwarding with bounded timeouts.
//!
//! Sends compile jobs and readiness probes to the simulator tier and
//! classifies every outcome: timeout, non-success status, or transport
//! failure. Nothing is retried; the harness exists to expose failure
//! rates. A timed-out compile keeps running downstream - there is no
//! cancellation propagation.

use crate::generator::CompileJob;
use cls_common::{CompileResponse, ForwardError, HealthState};
use std::time::Duration;
use tracing::{info, warn};

/// Default timeout for generator -> simulator compile calls.
pub const DEFAULT_COMPILE_TIMEOUT: Duration = Duration::from_secs(20);

/// Default timeout for the downstream readiness probe.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Forwards requests to the simulator tier.
#[derive(Debug, Clone)]
pub struct RequestForwarder {
    client: reqwest::Client,
    base_url: String,
}

impl RequestForwarder {
    /// Create a forwarder for a downstream base URL such as
    /// `http://localhost:8081`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Build a forwarder from host and port.
    pub fn for_endpoint(host: &str, port: u16) -> Self {
        Self::new(format!("http://{}:{}", host, port))
    }

    /// Forward one compile job downstream.
    ///
    /// Logs the request identifier and document size on entry and the
    /// digest on success; failures are classified and logged with the
    /// identifier before they propagate.
    pub async fn forward_compile(
        &self,
        job: &CompileJob,
        timeout: Duration,
    ) -> Result<CompileResponse, ForwardError> {
        info!(
            id = %job.id,
            doc_len = job.body.doc.len(),
            "starting compile request"
        );

        let response = self
            .client
            .post(format!("{}/compile", self.base_url))
            .json(&job.body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let err = ForwardError::Downstream {
                status: status.as_u16(),
            };
            warn!(id = %job.id, %status, "compile failed downstream");
            return Err(err);
        }

        let result: CompileResponse = response
            .json()
            .await
            .map_err(|e| classify(e, timeout))
            .inspect_err(|e| warn!(id = %job.id, error = %e, "compile response unreadable"))?;

        info!(id = %job.id, output = %result.output, "compile succeeded");
        Ok(result)
    }

    /// Probe the downstream readiness endpoint.
    ///
    /// A 2xx response is healthy, any other status is unhealthy, and a
    /// timeout or connection failure means the probe itself could not
    /// reach the service.
    pub async fn check_ready(&self, timeout: Duration) -> HealthState {
        let result = self
            .client
            .get(format!("{}/readyz", self.base_url))
            .timeout(timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => HealthState::Healthy,
            Ok(response) => {
                warn!(status = %response.status(), "downstream not ready");
                HealthState::Unhealthy
            }
            Err(e) => {
                warn!(error = %e, "downstream readiness probe failed");
                HealthState::Unreachable
            }
        }
    }
}

/// Map a reqwest error onto the forwarding taxonomy.
fn classify(error: reqwest::Error, timeout: Duration) -> ForwardError {
    if error.is_timeout() {
        ForwardError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        ForwardError::Transport {
            message: error.to_string(),
        }
    }
}
