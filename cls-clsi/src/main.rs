//! Compile Load Simulator - Simulator Tier
//!
//! Accepts compile requests and consumes real CPU time proportional to
//! the document size, standing in for a document-compilation backend
//! without doing real work.

#![forbid(unsafe_code)]

use anyhow::Result;
use cls_clsi::{http_api, metrics, simulator::CompileSimulator};
use cls_common::{env, init_logging, LogConfig, WorkParams};
use tracing::{info, warn};

/// Default listen port for the simulator tier.
const DEFAULT_PORT: u16 = 8081;

#[tokio::main]
async fn main() -> Result<()> {
    let _logging_guards = init_logging(&LogConfig::from_env("info"))?;

    if let Err(e) = metrics::register_metrics() {
        warn!(error = %e, "failed to register some metrics");
    }

    let params = WorkParams::from_env();
    info!(
        iterations = params.iterations,
        work_rate_ms = params.work_rate_ms,
        work_sd_ms = params.work_sd_ms,
        "loaded work parameters"
    );

    let state = http_api::HttpState {
        simulator: CompileSimulator::new(params),
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
