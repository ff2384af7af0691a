//! Simulator tier of the compile load harness.
//!
//! Turns a compile request into real consumed CPU time: a target
//! duration is sampled from the document size ([`sampler`]), then
//! faithfully burned by an iterated key-derivation loop ([`busywork`]),
//! returning a digest as proof of work ([`simulator`]).

#![forbid(unsafe_code)]

pub mod busywork;
pub mod http_api;
pub mod metrics;
pub mod sampler;
pub mod simulator;
