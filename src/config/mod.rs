//! Configuration model, environment merging, and validation

pub mod env;
pub mod parser;

pub use parser::load_config;

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Complete harness configuration after merging defaults, environment
/// variables, and CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Run the WebSocket test instead of HTTP
    pub ws: bool,
    /// Messages per WebSocket probe
    pub msgs: u32,
    /// Response/payload size in bytes
    pub size: usize,
    /// Artificial delay forwarded to the worker, in seconds
    pub delay: f64,
    /// Number of samples per batch
    pub samples: usize,
    /// Number of concurrent execution slots
    pub concurrency: usize,
    /// Number of backend workers to launch
    pub workers: usize,
    /// Print the raw sample series after the report
    pub plot: bool,
    /// Command used to launch the proxy
    pub proxy_cmd: String,
    /// Command used to launch a worker
    pub worker_cmd: String,
    /// Per-request client timeout in seconds
    pub timeout_seconds: u64,
    /// Colored console output
    pub enable_color: bool,
    /// Verbose output
    pub verbose: bool,
    /// Debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ws: false,
            msgs: crate::defaults::DEFAULT_MSGS,
            size: crate::defaults::DEFAULT_SIZE,
            delay: crate::defaults::DEFAULT_DELAY,
            samples: crate::defaults::DEFAULT_SAMPLES,
            concurrency: crate::defaults::DEFAULT_CONCURRENCY,
            workers: crate::defaults::DEFAULT_WORKERS,
            plot: false,
            proxy_cmd: crate::defaults::DEFAULT_PROXY_CMD.to_string(),
            worker_cmd: crate::defaults::DEFAULT_WORKER_CMD.to_string(),
            timeout_seconds: crate::defaults::DEFAULT_TIMEOUT.as_secs(),
            enable_color: crate::defaults::DEFAULT_ENABLE_COLOR,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Merge recognized `PBENCH_*` environment variables into this config
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Some(cmd) = env::EnvManager::string_var("PBENCH_PROXY_CMD") {
            self.proxy_cmd = cmd;
        }
        if let Some(cmd) = env::EnvManager::string_var("PBENCH_WORKER_CMD") {
            self.worker_cmd = cmd;
        }
        if let Some(timeout) = env::EnvManager::parsed_var::<u64>("PBENCH_TIMEOUT")? {
            self.timeout_seconds = timeout;
        }
        if let Some(no_color) = env::EnvManager::parsed_var::<bool>("PBENCH_NO_COLOR")? {
            self.enable_color = !no_color;
        }
        Ok(())
    }

    /// Validate the merged configuration
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(AppError::validation("sample count (-n) must be at least 1"));
        }
        if self.concurrency == 0 {
            return Err(AppError::validation("concurrency (-c) must be at least 1"));
        }
        if self.workers == 0 {
            return Err(AppError::validation("worker count (-w) must be at least 1"));
        }
        if self.msgs == 0 {
            return Err(AppError::validation("message count (--msgs) must be at least 1"));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(AppError::validation(
                "delay (--delay) must be a non-negative number",
            ));
        }
        if self.proxy_cmd.trim().is_empty() {
            return Err(AppError::validation("proxy command must not be empty"));
        }
        if self.worker_cmd.trim().is_empty() {
            return Err(AppError::validation("worker command must not be empty"));
        }
        if self.timeout_seconds == 0 {
            return Err(AppError::validation("timeout must be at least 1 second"));
        }
        Ok(())
    }
}
