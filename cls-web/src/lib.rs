//! Generator tier of the compile load harness.
//!
//! Synthesizes compile jobs of random size ([`generator`]), forwards
//! them to the simulator tier with bounded timeouts ([`forwarder`]),
//! and exposes readiness of the whole pipeline over HTTP
//! ([`http_api`]).

#![forbid(unsafe_code)]

pub mod demo;
pub mod forwarder;
pub mod generator;
pub mod http_api;
pub mod metrics;
