//! Error handling for the proxy benchmark harness

use thiserror::Error;

/// Custom error types for the benchmark harness
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Ephemeral port allocation errors
    #[error("Port allocation error: {0}")]
    Port(String),

    /// Readiness polling exhausted its retry budget
    #[error("Readiness timeout: {0}")]
    Readiness(String),

    /// Service bootstrap errors (spawn, route registration, route fetch)
    #[error("Bootstrap error: {0}")]
    Bootstrap(String),

    /// HTTP request errors during probing
    #[error("HTTP request error: {0}")]
    HttpRequest(String),

    /// WebSocket errors (handshake, send, malformed or missing echo)
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Probe execution errors not tied to a single transport
    #[error("Probe execution error: {0}")]
    Probe(String),

    /// Parsing errors (URLs, JSON, numbers)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// I/O errors (socket binds, process spawn)
    #[error("I/O error: {0}")]
    Io(String),

    /// Statistics calculation errors
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new port allocation error
    pub fn port<S: Into<String>>(message: S) -> Self {
        Self::Port(message.into())
    }

    /// Create a new readiness timeout error
    pub fn readiness<S: Into<String>>(message: S) -> Self {
        Self::Readiness(message.into())
    }

    /// Create a new bootstrap error
    pub fn bootstrap<S: Into<String>>(message: S) -> Self {
        Self::Bootstrap(message.into())
    }

    /// Create a new HTTP request error
    pub fn http_request<S: Into<String>>(message: S) -> Self {
        Self::HttpRequest(message.into())
    }

    /// Create a new WebSocket error
    pub fn web_socket<S: Into<String>>(message: S) -> Self {
        Self::WebSocket(message.into())
    }

    /// Create a new probe execution error
    pub fn probe<S: Into<String>>(message: S) -> Self {
        Self::Probe(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new statistics error
    pub fn statistics<S: Into<String>>(message: S) -> Self {
        Self::Statistics(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Port(_) => "PORT",
            Self::Readiness(_) => "READINESS",
            Self::Bootstrap(_) => "BOOTSTRAP",
            Self::HttpRequest(_) => "HTTP",
            Self::WebSocket(_) => "WS",
            Self::Probe(_) => "PROBE",
            Self::Parse(_) => "PARSE",
            Self::Io(_) => "IO",
            Self::Statistics(_) => "STATS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Check if error is recoverable (can retry the whole run)
    ///
    /// Port allocation races and readiness timeouts are transient startup
    /// conditions; configuration and validation failures are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Port(_) | Self::Readiness(_) | Self::HttpRequest(_) | Self::WebSocket(_) => true,
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => false,
            Self::Bootstrap(_) | Self::Probe(_) | Self::Io(_) | Self::Statistics(_) | Self::Internal(_) => false,
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1, // Invalid configuration/usage
            Self::HttpRequest(_) | Self::WebSocket(_) | Self::Probe(_) => 2, // Probe failures
            Self::Readiness(_) => 3, // A service never showed up
            Self::Port(_) => 4,      // Port allocation issues
            Self::Bootstrap(_) => 5, // Proxy/worker startup issues
            Self::Io(_) | Self::Statistics(_) => 6,
            Self::Internal(_) => 99, // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::HttpRequest(_) | Self::WebSocket(_) | Self::Probe(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Readiness(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Port(_) | Self::Bootstrap(_) => {
                    format!("[{}] {}", category.magenta().bold(), message.magenta())
                }
                Self::Io(_) | Self::Statistics(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() {
            Self::http_request(format!("connection error: {}", error))
        } else if error.is_timeout() {
            Self::http_request(format!("request timed out: {}", error))
        } else {
            Self::http_request(error.to_string())
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for AppError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::web_socket(error.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::parse(format!("Float parse error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

// Anyhow integration
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error context trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let original_error = e.into();
            let context = f();
            AppError::internal(format!("{}: {}", context, original_error))
        })
    }

    fn context(self, message: &'static str) -> Result<T> {
        self.with_context(|| message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = AppError::config("Invalid configuration");
        assert_eq!(config_error.category(), "CONFIG");
        assert!(!config_error.is_recoverable());
        assert_eq!(config_error.exit_code(), 1);

        let readiness_error = AppError::readiness("never showed up: http://127.0.0.1:1");
        assert_eq!(readiness_error.category(), "READINESS");
        assert!(readiness_error.is_recoverable());
        assert_eq!(readiness_error.exit_code(), 3);
    }

    #[test]
    fn test_error_display() {
        let error = AppError::readiness("never showed up: http://127.0.0.1:9999");
        let display = error.to_string();
        assert!(display.contains("Readiness timeout"));
        assert!(display.contains("http://127.0.0.1:9999"));
    }

    #[test]
    fn test_error_categories() {
        let errors = [
            AppError::config("config"),
            AppError::validation("validation"),
            AppError::port("port"),
            AppError::readiness("readiness"),
            AppError::bootstrap("bootstrap"),
            AppError::http_request("http"),
            AppError::web_socket("ws"),
            AppError::probe("probe"),
            AppError::parse("parse"),
            AppError::io("io"),
            AppError::statistics("stats"),
            AppError::internal("internal"),
        ];

        let expected_categories = [
            "CONFIG", "VALIDATION", "PORT", "READINESS", "BOOTSTRAP", "HTTP",
            "WS", "PROBE", "PARSE", "IO", "STATS", "INTERNAL",
        ];

        for (error, expected) in errors.iter().zip(expected_categories.iter()) {
            assert_eq!(error.category(), *expected);
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::config("test").exit_code(), 1);
        assert_eq!(AppError::http_request("test").exit_code(), 2);
        assert_eq!(AppError::web_socket("test").exit_code(), 2);
        assert_eq!(AppError::readiness("test").exit_code(), 3);
        assert_eq!(AppError::port("test").exit_code(), 4);
        assert_eq!(AppError::bootstrap("test").exit_code(), 5);
        assert_eq!(AppError::internal("test").exit_code(), 99);
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert_eq!(app_error.category(), "IO");

        let parse_error = "not_a_number".parse::<i32>().unwrap_err();
        let app_error: AppError = parse_error.into();
        assert_eq!(app_error.category(), "PARSE");

        let url_error = url::Url::parse("not-a-valid-url").unwrap_err();
        let app_error: AppError = url_error.into();
        assert_eq!(app_error.category(), "PARSE");

        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert_eq!(app_error.category(), "PARSE");
    }

    #[test]
    fn test_console_formatting() {
        let error = AppError::bootstrap("proxy exited early");
        let formatted_no_color = error.format_for_console(false);
        let formatted_color = error.format_for_console(true);

        assert!(formatted_no_color.contains("[BOOTSTRAP]"));
        assert!(formatted_color.contains("proxy exited early"));
        assert!(formatted_no_color.contains("proxy exited early"));
    }

    #[test]
    fn test_error_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such command",
        ));

        let with_context = result.context("While spawning proxy process");
        assert!(with_context.is_err());

        let error = with_context.unwrap_err();
        assert_eq!(error.category(), "INTERNAL");
        assert!(error.to_string().contains("While spawning proxy process"));
    }

    #[test]
    fn test_anyhow_integration() {
        let anyhow_error = anyhow::anyhow!("Test anyhow error");
        let app_error: AppError = anyhow_error.into();
        assert_eq!(app_error.category(), "INTERNAL");
    }
}
