//! Proxy overhead benchmark harness
//!
//! Provisions a reverse proxy and a pool of backend workers, drives timed
//! HTTP or WebSocket probes both through the proxy and directly against the
//! backends, and prints comparative latency and throughput statistics.

pub mod app;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod ports;
pub mod probe;
pub mod readiness;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use driver::{BatchParams, LoadDriver};
pub use error::{AppError, Result};
pub use models::{ProbeSpec, RouteTable, RouteTarget, RunResult};
pub use stats::{report, summarize, RunReport, Summary};
pub use types::Transport;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_SAMPLES: usize = 100;
    pub const DEFAULT_CONCURRENCY: usize = 1;
    pub const DEFAULT_WORKERS: usize = 1;
    pub const DEFAULT_MSGS: u32 = 1;
    pub const DEFAULT_SIZE: usize = 0;
    pub const DEFAULT_DELAY: f64 = 0.0;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_PROXY_CMD: &str = "configurable-http-proxy";
    pub const DEFAULT_WORKER_CMD: &str = "pbench-worker";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
