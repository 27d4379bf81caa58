//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Probe transport selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transport {
    /// Timed HTTP GET with full body read
    Http,
    /// Timed WebSocket echo round trips over one connection
    WebSocket,
}

impl Transport {
    /// Get a human-readable name for this transport
    pub fn name(&self) -> &'static str {
        match self {
            Transport::Http => "HTTP",
            Transport::WebSocket => "websocket",
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::Http
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_names() {
        assert_eq!(Transport::Http.name(), "HTTP");
        assert_eq!(Transport::WebSocket.name(), "websocket");
        assert_eq!(Transport::default(), Transport::Http);
    }
}
