//! Compile Load Simulator - Generator Tier
//!
//! Issues synthetic compile jobs against the simulator tier and
//! exposes the request-level view of the pipeline: demo page,
//! readiness of the downstream dependency, and request metrics.

#![forbid(unsafe_code)]

use anyhow::Result;
use cls_common::{config, env, init_logging, LogConfig};
use cls_web::{forwarder::RequestForwarder, http_api, metrics};
use tracing::{info, warn};

/// Default listen port for the generator tier.
const DEFAULT_PORT: u16 = 8080;

/// Default downstream simulator endpoint.
const DEFAULT_CLSI_HOST: &str = "localhost";
const DEFAULT_CLSI_PORT: u16 = 8081;

#[tokio::main]
async fn main() -> Result<()> {
    let _logging_guards = init_logging(&LogConfig::from_env("info"))?;

    if let Err(e) = metrics::register_metrics() {
        warn!(error = %e, "failed to register some metrics");
    }

    let clsi_host = env::string_or("CLSI_SERVICE_HOST", DEFAULT_CLSI_HOST);
    let clsi_port: u16 = env::var_or("CLSI_SERVICE_PORT", DEFAULT_CLSI_PORT);
    let max_doc_len: usize = env::var_or_min("DOC_LENGTH", config::DEFAULT_MAX_DOC_LEN, 1);
    info!(clsi_host, clsi_port, max_doc_len, "loaded configuration");

    let state = http_api::HttpState {
        forwarder: RequestForwarder::for_endpoint(&clsi_host, clsi_port),
        max_doc_len,
    };
    let router = http_api::create_router(state);

    let port: u16 = env::var_or("PORT", DEFAULT_PORT);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(port, "up");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    Ok(())
}

/// Resolve when the process receives SIGTERM or ctrl-c.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
