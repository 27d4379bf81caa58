//! Probe specification and route table data models

use crate::error::{AppError, Result};
use crate::types::Transport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// One configured unit of work: a single timed request or WebSocket
/// round-trip sequence against one target URL. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeSpec {
    /// Target base URL (direct worker URL or proxy-fronted URL)
    pub url: String,
    /// Artificial delay requested from the remote worker, in seconds
    pub delay: f64,
    /// Requested response/payload size in bytes
    pub size: usize,
    /// Number of messages per WebSocket probe (1 for HTTP)
    pub msgs: u32,
    /// Transport used for this probe
    pub transport: Transport,
}

impl ProbeSpec {
    /// Build a validated probe spec
    pub fn new(
        url: impl Into<String>,
        delay: f64,
        size: usize,
        msgs: u32,
        transport: Transport,
    ) -> Result<Self> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(AppError::validation(format!(
                "delay must be a non-negative number, got {}",
                delay
            )));
        }
        if msgs == 0 {
            return Err(AppError::validation("message count must be at least 1"));
        }
        Ok(Self {
            url: url.into(),
            delay,
            size,
            msgs,
            transport,
        })
    }

    /// The HTTP request URL with `size` and `delay` carried as query
    /// parameters for the remote worker to interpret.
    pub fn http_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)?;
        url.query_pairs_mut()
            .append_pair("size", &self.size.to_string())
            .append_pair("delay", &self.delay.to_string());
        Ok(url)
    }

    /// The WebSocket URL: scheme substituted (http -> ws, https -> wss) and
    /// the fixed `/ws` path suffix appended.
    pub fn ws_url(&self) -> Result<String> {
        let url = Url::parse(&self.url)?;
        let scheme = match url.scheme() {
            "http" => "ws",
            "https" => "wss",
            other => {
                return Err(AppError::validation(format!(
                    "cannot derive a websocket URL from scheme '{}'",
                    other
                )))
            }
        };
        let base = self.url.trim_end_matches('/');
        let rest = base
            .split_once("://")
            .map(|(_, rest)| rest)
            .ok_or_else(|| AppError::parse(format!("malformed URL: {}", self.url)))?;
        Ok(format!("{}://{}/ws", scheme, rest))
    }
}

/// One registered route, as reported by the proxy's management API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTarget {
    /// Backend base URL this route forwards to
    pub target: String,
}

/// The proxy's routing table: route prefix -> backend target.
///
/// Read-only for the harness; fetched once after bootstrap to discover the
/// direct backend URLs.
pub type RouteTable = BTreeMap<String, RouteTarget>;

/// Ordered per-probe timings in seconds for one batch. Order corresponds to
/// submission order, not completion order.
pub type RunResult = Vec<f64>;
