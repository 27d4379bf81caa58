//! Data models shared across the harness

pub mod probe;

pub use probe::{ProbeSpec, RouteTable, RouteTarget, RunResult};
