//! WebSocket probe behavior against a local echo server

use futures::{SinkExt, StreamExt};
use proxy_bench::models::ProbeSpec;
use proxy_bench::probe::probe_ws;
use proxy_bench::types::Transport;
use std::time::Duration;

/// Spawn a websocket echo server. Echoes every data frame back, optionally
/// sleeping first, and closes the connection after `close_after` echoes.
async fn spawn_echo_server(echo_delay: Duration, close_after: Option<usize>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::spawn(async move {
                let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
                let mut echoed = 0usize;
                while let Some(Ok(message)) = ws.next().await {
                    if !(message.is_text() || message.is_binary()) {
                        continue;
                    }
                    if !echo_delay.is_zero() {
                        tokio::time::sleep(echo_delay).await;
                    }
                    if ws.send(message).await.is_err() {
                        break;
                    }
                    echoed += 1;
                    if close_after.is_some_and(|limit| echoed >= limit) {
                        let _ = ws.close(None).await;
                        break;
                    }
                }
            });
        }
    });

    format!("http://127.0.0.1:{}/worker/1/", port)
}

fn ws_spec(url: &str, size: usize, msgs: u32) -> ProbeSpec {
    ProbeSpec::new(url, 0.0, size, msgs, Transport::WebSocket).unwrap()
}

#[tokio::test]
async fn single_message_round_trip() {
    let url = spawn_echo_server(Duration::ZERO, None).await;
    let elapsed = probe_ws(&ws_spec(&url, 32, 1), "deadbeef").await.unwrap();
    assert!(elapsed > 0.0);
}

#[tokio::test]
async fn per_message_average_divides_total() {
    let delay = Duration::from_millis(30);
    let url = spawn_echo_server(delay, None).await;

    // Four echoes, each at least 30ms: the per-message average must sit at
    // or above the per-echo delay but well below the total.
    let average = probe_ws(&ws_spec(&url, 0, 4), "").await.unwrap();
    assert!(average >= 0.030);
    assert!(average < 4.0 * 0.030 + 0.5);
}

#[tokio::test]
async fn empty_payload_works() {
    let url = spawn_echo_server(Duration::ZERO, None).await;
    let elapsed = probe_ws(&ws_spec(&url, 0, 2), "").await.unwrap();
    assert!(elapsed > 0.0);
}

#[tokio::test]
async fn mid_sequence_close_is_a_hard_failure() {
    // Server closes after the first echo; the probe expects three.
    let url = spawn_echo_server(Duration::ZERO, Some(1)).await;
    let err = probe_ws(&ws_spec(&url, 0, 3), "").await.unwrap_err();
    assert_eq!(err.category(), "WS");
}

#[tokio::test]
async fn refused_connection_is_a_websocket_error() {
    let port = proxy_bench::ports::random_ports(1).unwrap()[0];
    let url = format!("http://127.0.0.1:{}/", port);
    let err = probe_ws(&ws_spec(&url, 0, 1), "").await.unwrap_err();
    assert_eq!(err.category(), "WS");
}
