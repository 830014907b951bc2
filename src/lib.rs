//! Core library for the `load-test` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, scenario profiles, the per-iteration request/check logic, the
//! virtual-user engine, metrics aggregation, and the stand-in health server
//! the scenarios can be pointed at locally.

pub mod cli;
pub mod config;
pub mod engine;
pub mod iteration;
pub mod metrics;
pub mod scenarios;
pub mod server;
