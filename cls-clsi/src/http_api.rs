//! HTTP API of the simulator tier.
//!
//! Provides:
//! - `POST /compile` - run one simulated compile
//! - `GET /livez` - liveness (process responsive)
//! - `GET /readyz` - readiness (one real canned compile succeeds)
//! - `GET /metrics` - Prometheus metrics export

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info};

use crate::metrics;
use crate::simulator::CompileSimulator;
use cls_common::CompileRequestBody;

/// Canned document used by the readiness probe: 640 bytes of real
/// payload, so readiness proves an actual compile round-trip.
const READINESS_DOC: &str = "test doc";
const READINESS_DOC_REPEAT: usize = 80;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// The compile simulator, shared read-only across requests.
    pub simulator: CompileSimulator,
}

/// Create the HTTP router for the simulator tier.
pub fn create_router(state: HttpState) -> Router {
    Router::new()
        .route("/compile", post(compile_handler))
        .route("/livez", get(livez_handler))
        .route("/readyz", get(readyz_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(Arc::new(state))
}

/// Handler for `POST /compile` - one simulated compile.
///
/// A malformed or missing body is rejected by the JSON extractor with
/// a 4xx before this handler runs.
async fn compile_handler(
    State(state): State<Arc<HttpState>>,
    Json(request): Json<CompileRequestBody>,
) -> impl IntoResponse {
    metrics::inc_requests("/compile");
    info!(
        compiler = %request.compiler,
        doc_size = request.doc.len(),
        "compile starting"
    );

    let timer = metrics::COMPILE_TIME.start_timer();
    match state.simulator.compile(&request).await {
        Ok(result) => {
            timer.observe_duration();
            metrics::inc_compile("success");
            Json(result).into_response()
        }
        Err(e) => {
            timer.observe_duration();
            metrics::inc_compile("error");
            error!(error = %e, "compile failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Handler for `GET /livez` - always 200 while the process responds.
async fn livez_handler() -> StatusCode {
    metrics::inc_requests("/livez");
    StatusCode::OK
}

/// Handler for `GET /readyz` - proves the service can do useful work
/// by running one real compile against a canned document.
async fn readyz_handler(State(state): State<Arc<HttpState>>) -> StatusCode {
    metrics::inc_requests("/readyz");
    let request = CompileRequestBody {
        doc: READINESS_DOC.repeat(READINESS_DOC_REPEAT),
        compiler: cls_common::DEFAULT_COMPILER.to_string(),
    };
    match state.simulator.compile(&request).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            error!(error = %e, "readiness compile failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Handler for `GET /metrics` - Prometheus text exposition.
async fn metrics_handler() -> impl IntoResponse {
    match metrics::encode_metrics() {
        Ok(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            output,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {}", e),
        )
            .into_response(),
    }
}
