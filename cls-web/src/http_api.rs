//! HTTP API of the generator tier.
//!
//! Provides:
//! - `POST /compile` - generate one synthetic job and forward it
//! - `GET /` - human-facing demo page
//! - `GET /livez` - liveness (process responsive)
//! - `GET /readyz` - readiness of the downstream simulator tier
//! - `GET /metrics` - Prometheus metrics export

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use cls_common::{ForwardError, HealthState};
use rand::thread_rng;
use tracing::error;

use crate::demo::DEMO_PAGE;
use crate::forwarder::{RequestForwarder, DEFAULT_COMPILE_TIMEOUT, DEFAULT_READY_TIMEOUT};
use crate::generator;
use crate::metrics;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Forwarder to the simulator tier.
    pub forwarder: RequestForwarder,
    /// Upper bound on generated document length.
    pub max_doc_len: usize,
}

/// Create the HTTP router for the generator tier.
pub fn create_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(demo_handler))
        .route("/compile", post(compile_handler))
        .route("/livez", get(livez_handler))
        .route("/readyz", get(readyz_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(Arc::new(state))
}

/// Handler for `POST /compile` - synthesize one job, forward it, and
/// return the downstream `{ output }` verbatim.
///
/// All forwarding failures map to 500; the classification still lands
/// in the logs and the outcome counter.
async fn compile_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    metrics::inc_requests("/compile");

    let job = {
        let mut rng = thread_rng();
        generator::generate(&mut rng, state.max_doc_len)
    };

    let timer = metrics::COMPILE_REQUEST_DURATION.start_timer();
    let result = state
        .forwarder
        .forward_compile(&job, DEFAULT_COMPILE_TIMEOUT)
        .await;
    timer.observe_duration();

    match result {
        Ok(response) => {
            metrics::inc_compile_request("success");
            Json(response).into_response()
        }
        Err(e) => {
            metrics::inc_compile_request(outcome_label(&e));
            error!(id = %job.id, error = %e, "compile request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn outcome_label(error: &ForwardError) -> &'static str {
    match error {
        ForwardError::Timeout { .. } => "timeout",
        ForwardError::Downstream { .. } => "downstream",
        ForwardError::Transport { .. } => "transport",
    }
}

/// Handler for `GET /` - the demo page.
async fn demo_handler() -> Html<&'static str> {
    metrics::inc_requests("/");
    Html(DEMO_PAGE)
}

/// Handler for `GET /livez` - always 200 while the process responds.
async fn livez_handler() -> StatusCode {
    metrics::inc_requests("/livez");
    StatusCode::OK
}

/// Handler for `GET /readyz` - ready only when the downstream
/// simulator tier reports ready within a short timeout.
async fn readyz_handler(State(state): State<Arc<HttpState>>) -> StatusCode {
    metrics::inc_requests("/readyz");
    match state.forwarder.check_ready(DEFAULT_READY_TIMEOUT).await {
        HealthState::Healthy => StatusCode::OK,
        HealthState::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthState::Unreachable => StatusCode::INTERNAL_SERVER_ERROR,
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn make_test_router() -> Router {
        create_router(HttpState {
            // Nothing listens here; only the endpoints that don't
            // touch the downstream are exercised in this module.
            forwarder: RequestForwarder::new("http://127.0.0.1:1"),
            max_doc_len: 1000,
        })
    }

    #[tokio::test]
    async fn test_livez_endpoint() {
        let response = make_test_router()
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_demo_page_is_html() {
        let response = make_test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap_or(""));
        assert!(content_type.unwrap().contains("text/html"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Compiler Demo"));
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let _ = metrics::register_metrics();
        let response = make_test_router()
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz_unreachable_downstream_returns_500() {
        // Port 1 refuses connections, so the probe errors out.
        let response = make_test_router()
            .oneshot(
                Request::builder()
                    .uri("/readyz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_router_returns_404_for_unknown_routes() {
        let response = make_test_router()
            .oneshot(
                Request::builder()
                    .uri("/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
