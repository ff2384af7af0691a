//! Wire types shared by the generator and simulator tiers.

use serde::{Deserialize, Serialize};

/// Compiler tag used when a request does not specify one.
///
/// Accepted on the wire and logged for correlation, but the simulator
/// does not branch on it.
pub const DEFAULT_COMPILER: &str = "pdftex";

/// Body of `POST /compile` on the simulator tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompileRequestBody {
    /// Document payload. Its length drives the simulated service time.
    pub doc: String,

    /// Compiler tag, reserved for future branching.
    #[serde(default = "default_compiler")]
    pub compiler: String,
}

fn default_compiler() -> String {
    DEFAULT_COMPILER.to_string()
}

/// Response body of a successful compile: the hex digest standing in
/// for compiled output. Always 32 lowercase hex characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompileResponse {
    pub output: String,
}

/// Outcome of a readiness probe.
///
/// Computed fresh on every check; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    /// The service (and, for the generator tier, its downstream
    /// dependency) can currently perform useful work.
    Healthy,
    /// The service or its downstream reported a failure.
    Unhealthy,
    /// The probe itself errored: timeout or connection failure.
    Unreachable,
}

impl HealthState {
    /// Whether this state should be reported as ready.
    pub fn is_healthy(self) -> bool {
        matches!(self, HealthState::Healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiler_defaults_to_pdftex() {
        let body: CompileRequestBody = serde_json::from_str(r#"{"doc":"hello"}"#).unwrap();
        assert_eq!(body.doc, "hello");
        assert_eq!(body.compiler, "pdftex");
    }

    #[test]
    fn explicit_compiler_is_kept() {
        let body: CompileRequestBody =
            serde_json::from_str(r#"{"doc":"x","compiler":"xetex"}"#).unwrap();
        assert_eq!(body.compiler, "xetex");
    }

    #[test]
    fn missing_doc_fails_to_parse() {
        let result = serde_json::from_str::<CompileRequestBody>(r#"{"compiler":"pdftex"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn health_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&HealthState::Unreachable).unwrap(),
            r#""unreachable""#
        );
        assert!(HealthState::Healthy.is_healthy());
        assert!(!HealthState::Unhealthy.is_healthy());
    }
}
