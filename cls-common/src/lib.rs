//! Shared building blocks for the compile load simulator.
//!
//! Both tiers (the `cls-web` workload generator and the `cls-clsi`
//! compile simulator) depend on this crate for:
//! - wire types exchanged over HTTP ([`CompileRequestBody`],
//!   [`CompileResponse`])
//! - the readiness tri-state ([`HealthState`])
//! - the forwarding/compile error taxonomy
//! - environment-driven configuration ([`WorkParams`], [`env`])
//! - `tracing` logging initialization ([`LogConfig`], [`init_logging`])

pub mod config;
pub mod env;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::WorkParams;
pub use errors::{CompileError, ForwardError};
pub use logging::{init_logging, LogConfig, LogFormat, LoggingGuards};
pub use types::{CompileRequestBody, CompileResponse, HealthState, DEFAULT_COMPILER};
