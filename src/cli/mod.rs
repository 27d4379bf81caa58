//! Command-line interface

use clap::Parser;

/// Proxy overhead benchmark - times HTTP/WebSocket probes through a reverse
/// proxy and directly against its backends, then compares the two
#[derive(Parser, Debug, Clone)]
#[command(name = "pbench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Run the websocket test instead of http
    #[arg(long)]
    pub ws: bool,

    /// Number of messages per websocket test
    #[arg(long, default_value_t = crate::defaults::DEFAULT_MSGS)]
    pub msgs: u32,

    /// Size of each websocket message (or http reply) in bytes
    #[arg(long, default_value_t = crate::defaults::DEFAULT_SIZE)]
    pub size: usize,

    /// Artificial delay to add, in seconds
    #[arg(long, default_value_t = crate::defaults::DEFAULT_DELAY, allow_negative_numbers = true)]
    pub delay: f64,

    /// Number of requests to make per batch
    #[arg(short = 'n', long = "samples", default_value_t = crate::defaults::DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Number of concurrent requests
    #[arg(short = 'c', long = "concurrency", default_value_t = crate::defaults::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Number of worker processes
    #[arg(short = 'w', long = "workers", default_value_t = crate::defaults::DEFAULT_WORKERS)]
    pub workers: usize,

    /// Print the raw per-sample series after the report
    #[arg(long)]
    pub plot: bool,

    /// Command used to launch the proxy (overrides PBENCH_PROXY_CMD)
    #[arg(long)]
    pub proxy_cmd: Option<String>,

    /// Command used to launch a worker (overrides PBENCH_WORKER_CMD)
    #[arg(long)]
    pub worker_cmd: Option<String>,

    /// Per-request timeout in seconds (overrides PBENCH_TIMEOUT)
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("pbench").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert!(!cli.ws);
        assert_eq!(cli.msgs, 1);
        assert_eq!(cli.size, 0);
        assert_eq!(cli.delay, 0.0);
        assert_eq!(cli.samples, 100);
        assert_eq!(cli.concurrency, 1);
        assert_eq!(cli.workers, 1);
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-n", "200", "-c", "20", "-w", "4"]);
        assert_eq!(cli.samples, 200);
        assert_eq!(cli.concurrency, 20);
        assert_eq!(cli.workers, 4);
    }

    #[test]
    fn test_color_conflict() {
        let cli = parse(&["--color", "--no-color"]);
        assert!(cli.validate().is_err());
        assert!(parse(&["--color"]).validate().is_ok());
    }
}
