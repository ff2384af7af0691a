//! The simulated compile operation.
//!
//! Composes the duration sampler and the busy-work engine: a request's
//! document size is turned into a target service time, and that time
//! is then actually consumed on the blocking thread pool.

use crate::busywork;
use crate::sampler::DurationSampler;
use cls_common::{CompileError, CompileRequestBody, CompileResponse, WorkParams};
use rand::thread_rng;
use std::time::Duration;
use tracing::debug;

/// Simulates one compile per request. Cheap to clone; holds only the
/// immutable work parameters and derived sampler state.
#[derive(Debug, Clone, Copy)]
pub struct CompileSimulator {
    params: WorkParams,
    sampler: DurationSampler,
}

impl CompileSimulator {
    pub fn new(params: WorkParams) -> Self {
        Self {
            params,
            sampler: DurationSampler::new(&params),
        }
    }

    /// Run one simulated compile.
    ///
    /// The busy-work loop is CPU-bound for the whole target duration
    /// and contains no suspension points, so it runs on the blocking
    /// pool; request acceptance is never blocked by an in-flight
    /// compile. Fails only if the derivation primitive itself errors.
    pub async fn compile(&self, request: &CompileRequestBody) -> Result<CompileResponse, CompileError> {
        let target_ms = {
            let mut rng = thread_rng();
            self.sampler.sample(&mut rng, request.doc.len())
        };
        debug!(doc_len = request.doc.len(), target_ms, "sampled compile duration");

        let seed: Vec<u8> = request.doc.bytes().take(busywork::DIGEST_LEN).collect();
        let target = Duration::from_millis(target_ms);
        let iterations = self.params.iterations;

        let digest = tokio::task::spawn_blocking(move || busywork::run(&seed, target, iterations))
            .await
            .map_err(|e| CompileError::Task(e.to_string()))??;

        Ok(CompileResponse {
            output: hex::encode(digest),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parameters that keep simulated durations in the microsecond
    /// range so tests stay fast.
    fn fast_params() -> WorkParams {
        WorkParams {
            iterations: 10,
            work_rate_ms: 0.0001,
            work_sd_ms: 0.0,
            max_doc_len: 1000,
        }
    }

    fn request(doc: String) -> CompileRequestBody {
        CompileRequestBody {
            doc,
            compiler: "pdftex".to_string(),
        }
    }

    #[tokio::test]
    async fn digest_length_is_independent_of_doc_length() {
        let simulator = CompileSimulator::new(fast_params());
        for len in [1usize, 1000, 50_000] {
            let result = simulator.compile(&request("x".repeat(len))).await.unwrap();
            assert_eq!(result.output.len(), 32, "doc of {len} bytes");
            assert!(result.output.chars().all(|c| c.is_ascii_hexdigit()));
            assert_eq!(result.output, result.output.to_lowercase());
        }
    }

    #[tokio::test]
    async fn empty_doc_still_produces_a_digest() {
        let simulator = CompileSimulator::new(fast_params());
        let result = simulator.compile(&request(String::new())).await.unwrap();
        assert_eq!(result.output.len(), 32);
    }

    #[tokio::test]
    async fn concurrent_compiles_do_not_serialize() {
        let simulator = CompileSimulator::new(WorkParams {
            iterations: 10,
            work_rate_ms: 1.0,
            work_sd_ms: 0.0,
            max_doc_len: 1000,
        });

        // Each compile targets ~100ms. Run 4 concurrently: if they
        // serialized, the batch would take ~400ms.
        let start = std::time::Instant::now();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sim = simulator;
                tokio::spawn(async move { sim.compile(&request("y".repeat(100 + i))).await })
            })
            .collect();
        for handle in handles {
            let result = handle.await.unwrap().unwrap();
            assert_eq!(result.output.len(), 32);
        }
        assert!(
            start.elapsed() < Duration::from_millis(350),
            "concurrent compiles appear to have serialized: {:?}",
            start.elapsed()
        );
    }
}
