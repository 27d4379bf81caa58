//! Concurrent probe dispatch
//!
//! Fans a batch of probe specs out over a bounded number of in-flight
//! probes and collects the raw timings. `stream::buffered` gives both the
//! concurrency bound and submission-order results: probes may complete out
//! of order, but the collected sequence matches the order specs were built.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::logging::Logger;
use crate::models::{ProbeSpec, RunResult};
use crate::probe::{run_probe, PayloadCache};
use crate::types::Transport;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

/// Parameters for one batch of probes
#[derive(Debug, Clone)]
pub struct BatchParams {
    /// Requested number of samples
    pub samples: usize,
    /// Artificial delay forwarded to the worker, in seconds
    pub delay: f64,
    /// Response/payload size in bytes
    pub size: usize,
    /// Messages per WebSocket probe
    pub msgs: u32,
    /// Transport for every probe in the batch
    pub transport: Transport,
}

impl From<&Config> for BatchParams {
    fn from(config: &Config) -> Self {
        Self {
            samples: config.samples,
            delay: config.delay,
            size: config.size,
            msgs: config.msgs,
            transport: if config.ws {
                Transport::WebSocket
            } else {
                Transport::Http
            },
        }
    }
}

/// Executes batches of probes under a fixed concurrency bound
pub struct LoadDriver {
    client: reqwest::Client,
    concurrency: usize,
    payloads: PayloadCache,
    logger: Logger,
}

impl LoadDriver {
    /// Create a driver with `concurrency` execution slots
    pub fn new(client: reqwest::Client, concurrency: usize, logger: Logger) -> Result<Self> {
        if concurrency == 0 {
            return Err(AppError::validation("concurrency must be at least 1"));
        }
        Ok(Self {
            client,
            concurrency,
            payloads: PayloadCache::new(),
            logger,
        })
    }

    /// Build the batch's probe specs by cycling through `urls`.
    ///
    /// The batch holds `len(urls) * (samples / len(urls))` specs: every URL
    /// gets the same number of probes, so when `samples` is not evenly
    /// divisible by the URL count the remainder samples are dropped. The
    /// driver warns about the truncation at run time.
    pub fn build_specs(urls: &[String], params: &BatchParams) -> Result<Vec<ProbeSpec>> {
        if urls.is_empty() {
            return Err(AppError::validation(
                "cannot build a batch against an empty URL list",
            ));
        }
        let repeats = params.samples / urls.len();
        urls.iter()
            .cycle()
            .take(urls.len() * repeats)
            .map(|url| {
                ProbeSpec::new(
                    url.clone(),
                    params.delay,
                    params.size,
                    params.msgs,
                    params.transport,
                )
            })
            .collect()
    }

    /// Run one batch and return per-probe timings in submission order.
    ///
    /// The first failed probe aborts the batch; in-flight probes are
    /// dropped with the stream before the error is returned.
    pub async fn run(&mut self, urls: &[String], params: &BatchParams) -> Result<RunResult> {
        let specs = Self::build_specs(urls, params)?;
        if specs.len() < params.samples {
            self.logger.warn(
                "driver",
                &format!(
                    "dropping {} remainder sample(s): {} requested, {} URLs",
                    params.samples - specs.len(),
                    params.samples,
                    urls.len()
                ),
            );
        }
        self.logger.debug(
            "driver",
            &format!(
                "dispatching {} {} probe(s) across {} slot(s)",
                specs.len(),
                params.transport.name(),
                self.concurrency
            ),
        );

        let payload: Arc<str> = match params.transport {
            Transport::WebSocket => Arc::from(self.payloads.get(params.size)),
            Transport::Http => Arc::from(""),
        };

        let client = self.client.clone();
        let results: RunResult = stream::iter(specs.into_iter().map(|spec| {
            let client = client.clone();
            let payload = payload.clone();
            async move { run_probe(&client, &spec, &payload).await }
        }))
        .buffered(self.concurrency)
        .try_collect()
        .await?;

        Ok(results)
    }
}
