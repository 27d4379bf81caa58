//! Readiness polling for freshly spawned services
//!
//! Readiness means reachable, not healthy: any response at all, including an
//! HTTP error status, counts as "up". Only connection errors are retried.
//! Polling is a plain sleep loop; it runs once per service at startup, off
//! the measurement hot path.

use crate::error::{AppError, Result};
use std::time::Duration;

/// Maximum number of polling attempts before giving up
pub const READINESS_ATTEMPTS: usize = 100;

/// Fixed interval between polling attempts
pub const READINESS_INTERVAL: Duration = Duration::from_millis(100);

/// Wait until `url` responds to a GET, using the default retry budget
/// (100 attempts at 100ms, a 10s ceiling).
pub async fn wait_until_up(client: &reqwest::Client, url: &str) -> Result<()> {
    wait_until_up_with(client, url, READINESS_ATTEMPTS, READINESS_INTERVAL).await
}

/// Wait until `url` responds to a GET, with an explicit retry budget.
pub async fn wait_until_up_with(
    client: &reqwest::Client,
    url: &str,
    attempts: usize,
    interval: Duration,
) -> Result<()> {
    for _ in 0..attempts {
        match client.get(url).send().await {
            Ok(_) => return Ok(()),
            Err(e) if e.is_connect() => tokio::time::sleep(interval).await,
            // Transport failures other than connection refusal are not a
            // "service still starting" signal; propagate them.
            Err(e) => return Err(e.into()),
        }
    }
    Err(AppError::readiness(format!("never showed up: {}", url)))
}
