//! Structured logging for the benchmark harness
//!
//! A small leveled logger writing timestamped records to stderr, so log
//! output never interleaves with the report printed on stdout. Each logger
//! carries a per-run correlation id that shows up in debug output.

use crate::error::{AppError, Result};
use chrono::Utc;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug level - detailed information for debugging
    Debug = 0,
    /// Info level - general lifecycle information
    Info = 1,
    /// Warning level - potentially surprising situations
    Warn = 2,
    /// Error level - error events
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m", // Cyan
            LogLevel::Info => "\x1b[32m",  // Green
            LogLevel::Warn => "\x1b[33m",  // Yellow
            LogLevel::Error => "\x1b[31m", // Red
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Leveled stderr logger with a per-run correlation id
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    use_color: bool,
    run_id: Uuid,
}

impl Logger {
    /// Create a new logger filtering below `level`
    pub fn new(level: LogLevel, use_color: bool) -> Self {
        Self {
            level,
            use_color,
            run_id: Uuid::new_v4(),
        }
    }

    /// The correlation id attached to this run
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Whether records at `level` would be emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn log(&self, level: LogLevel, component: &str, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        if self.use_color {
            eprintln!(
                "[{}] {}{:5}{} [{}] {}",
                timestamp,
                level.color_code(),
                level.as_str(),
                LogLevel::reset_code(),
                component,
                message
            );
        } else {
            eprintln!(
                "[{}] {:5} [{}] {}",
                timestamp,
                level.as_str(),
                component,
                message
            );
        }
    }

    /// Log a debug record, tagged with the run correlation id
    pub fn debug(&self, component: &str, message: &str) {
        self.log(
            LogLevel::Debug,
            component,
            &format!("{} (run {})", message, self.run_id),
        );
    }

    /// Log an info record
    pub fn info(&self, component: &str, message: &str) {
        self.log(LogLevel::Info, component, message);
    }

    /// Log a warning record
    pub fn warn(&self, component: &str, message: &str) {
        self.log(LogLevel::Warn, component, message);
    }

    /// Log an error record
    pub fn error(&self, component: &str, message: &str) {
        self.log(LogLevel::Error, component, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info, true)
    }
}
