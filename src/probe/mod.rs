//! Probe functions: one timed round trip per call
//!
//! Both transports are pure functions of a `ProbeSpec` plus a prebuilt
//! payload, holding no shared state, so they are safe to run in parallel.

use crate::error::{AppError, Result};
use crate::models::ProbeSpec;
use crate::types::Transport;
use futures::{SinkExt, Stream, StreamExt};
use rand::RngCore;
use std::collections::HashMap;
use std::time::Instant;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Pluggable random-byte source for payload generation
pub type ByteGenerator = Box<dyn FnMut(usize) -> Vec<u8> + Send>;

/// Memoizing store of WebSocket payloads keyed by requested byte count.
///
/// A payload for a given size is generated once, on first request, and
/// reused for every probe in the run. The byte source is injectable so tests
/// can make payloads deterministic.
pub struct PayloadCache {
    generate: ByteGenerator,
    cache: HashMap<usize, String>,
}

impl PayloadCache {
    /// Create a cache backed by the thread-local RNG
    pub fn new() -> Self {
        Self::with_generator(Box::new(|n| {
            let mut buf = vec![0u8; n];
            rand::thread_rng().fill_bytes(&mut buf);
            buf
        }))
    }

    /// Create a cache with an explicit byte source
    pub fn with_generator(generate: ByteGenerator) -> Self {
        Self {
            generate,
            cache: HashMap::new(),
        }
    }

    /// Hex payload string for `size`: `size / 2` random bytes hex-encoded,
    /// so the transmitted string is about `size` characters long.
    pub fn get(&mut self, size: usize) -> &str {
        let generate = &mut self.generate;
        self.cache
            .entry(size)
            .or_insert_with(|| hex_encode(&generate(size / 2)))
    }
}

impl Default for PayloadCache {
    fn default() -> Self {
        Self::new()
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        use std::fmt::Write;
        let _ = write!(out, "{:02x}", b);
        out
    })
}

/// Execute one probe, dispatching on the spec's transport.
pub async fn run_probe(client: &reqwest::Client, spec: &ProbeSpec, payload: &str) -> Result<f64> {
    match spec.transport {
        Transport::Http => probe_http(client, spec).await,
        Transport::WebSocket => probe_ws(spec, payload).await,
    }
}

/// Time a single HTTP request: wall time from just before the request is
/// sent to just after the whole body has been read. An error status still
/// measures; only transport failures abort the probe.
pub async fn probe_http(client: &reqwest::Client, spec: &ProbeSpec) -> Result<f64> {
    let url = spec.http_url()?;
    let tic = Instant::now();
    let response = client.get(url).send().await?;
    let _body = response.bytes().await?;
    Ok(tic.elapsed().as_secs_f64())
}

/// Time a WebSocket run: open one connection, then send `msgs` JSON
/// messages, waiting for each echo before the next send (no pipelining).
///
/// Returns the total wall time divided by `msgs`. Connection setup and
/// teardown sit inside the measured window, so the per-message average
/// carries a handshake bias for small `msgs`.
pub async fn probe_ws(spec: &ProbeSpec, payload: &str) -> Result<f64> {
    let ws_url = spec.ws_url()?;
    let message = serde_json::json!({
        "delay": spec.delay,
        "data": payload,
    })
    .to_string();

    let tic = Instant::now();
    let (mut stream, _response) = connect_async(&ws_url).await?;
    for i in 0..spec.msgs {
        stream.send(Message::Text(message.clone())).await?;
        read_echo(&mut stream, &ws_url, i).await?;
    }
    let _ = stream.close(None).await;
    Ok(tic.elapsed().as_secs_f64() / spec.msgs as f64)
}

/// Read one echo frame, skipping control frames. A closed or dropped
/// connection before the echo arrives is a hard probe failure.
async fn read_echo<S>(
    stream: &mut S,
    url: &str,
    message_index: u32,
) -> Result<()>
where
    S: Stream<Item = std::result::Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        match stream.next().await {
            Some(Ok(Message::Text(_))) | Some(Ok(Message::Binary(_))) => return Ok(()),
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) | Some(Ok(Message::Frame(_))) => {
                continue
            }
            Some(Ok(Message::Close(_))) | None => {
                return Err(AppError::web_socket(format!(
                    "connection to {} closed before echo {} arrived",
                    url, message_index
                )))
            }
            Some(Err(e)) => return Err(e.into()),
        }
    }
}
