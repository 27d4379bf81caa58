//! Ephemeral port allocation
//!
//! Ports are discovered by binding transient listeners to port 0 and reading
//! back the OS-assigned port. All listeners are held until every port is
//! known, which guarantees distinctness at the instant of allocation. There
//! is no reservation afterwards: a consumer that loses the race and fails to
//! bind surfaces that as a startup error, not a retry here.

use crate::error::{AppError, Result};
use std::net::TcpListener;

/// Return `n` distinct ports that were free at allocation time.
pub fn random_ports(n: usize) -> Result<Vec<u16>> {
    let mut listeners = Vec::with_capacity(n);
    for _ in 0..n {
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .map_err(|e| AppError::port(format!("failed to bind an ephemeral port: {}", e)))?;
        listeners.push(listener);
    }
    listeners
        .iter()
        .map(|listener| {
            listener
                .local_addr()
                .map(|addr| addr.port())
                .map_err(|e| AppError::port(format!("failed to read assigned port: {}", e)))
        })
        .collect()
}
