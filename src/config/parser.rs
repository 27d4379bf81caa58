//! Configuration parsing from CLI arguments and environment variables

use crate::cli::Cli;
use crate::config::{env::EnvManager, Config};
use crate::error::Result;

/// Build the complete configuration: defaults, then environment, then CLI
/// overrides, then validation.
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        EnvManager::load_env_file(self.cli.debug)?;
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        config.ws = self.cli.ws;
        config.msgs = self.cli.msgs;
        config.size = self.cli.size;
        config.delay = self.cli.delay;
        config.samples = self.cli.samples;
        config.concurrency = self.cli.concurrency;
        config.workers = self.cli.workers;
        config.plot = self.cli.plot;
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        // Explicit commands beat whatever the environment provided.
        if let Some(ref cmd) = self.cli.proxy_cmd {
            config.proxy_cmd = cmd.clone();
        }
        if let Some(ref cmd) = self.cli.worker_cmd {
            config.worker_cmd = cmd.clone();
        }
        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if self.cli.no_color {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("pbench").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_load() {
        let config = load_config(parse_cli(&[])).unwrap();
        assert!(!config.ws);
        assert_eq!(config.samples, crate::defaults::DEFAULT_SAMPLES);
        assert_eq!(config.concurrency, crate::defaults::DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_cli_overrides() {
        let config = load_config(parse_cli(&[
            "--ws", "--msgs", "5", "--size", "1024", "--delay", "0.1", "-n", "50", "-c", "10",
            "-w", "3",
        ]))
        .unwrap();
        assert!(config.ws);
        assert_eq!(config.msgs, 5);
        assert_eq!(config.size, 1024);
        assert_eq!(config.delay, 0.1);
        assert_eq!(config.samples, 50);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.workers, 3);
    }

    #[test]
    fn test_explicit_commands_override_env() {
        let config = load_config(parse_cli(&["--proxy-cmd", "my-proxy --verbose"])).unwrap();
        assert_eq!(config.proxy_cmd, "my-proxy --verbose");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(load_config(parse_cli(&["-n", "0"])).is_err());
        assert!(load_config(parse_cli(&["--delay", "-1"])).is_err());
    }

    #[test]
    fn test_no_color_flag() {
        let config = load_config(parse_cli(&["--no-color"])).unwrap();
        assert!(!config.enable_color);
    }
}
