//! Report rendering for the proxied-vs-direct comparison

use crate::config::Config;
use crate::models::RunResult;
use crate::stats::{RunReport, Summary};
use colored::Colorize;

/// Renders run banners, summaries, and sample dumps
pub trait OutputFormatter: Send + Sync {
    /// The run banner: workers, request count, concurrency
    fn format_banner(&self, config: &Config) -> String;

    /// The parameter line for the transport under test
    fn format_test_header(&self, config: &Config) -> String;

    /// A section label ("Bypassing proxy", "Proxied")
    fn format_section(&self, label: &str) -> String;

    /// The two-line summary for one batch: req/sec and milliseconds
    fn format_report(&self, report: &RunReport) -> String;

    /// Raw per-sample dump used by `--plot`
    fn format_samples(&self, direct: &RunResult, proxied: &RunResult) -> String {
        let mut out = String::from("# sample\tdirect_s\tproxied_s\n");
        let rows = direct.len().max(proxied.len());
        for i in 0..rows {
            let left = direct.get(i).map(|v| format!("{:.6}", v)).unwrap_or_default();
            let right = proxied.get(i).map(|v| format!("{:.6}", v)).unwrap_or_default();
            out.push_str(&format!("{}\t{}\t{}\n", i, left, right));
        }
        out
    }
}

fn banner_text(config: &Config) -> String {
    format!(
        "Running with {} workers, {} requests ({} concurrent)",
        config.workers, config.samples, config.concurrency
    )
}

fn test_header_text(config: &Config) -> String {
    if config.ws {
        format!(
            "Websocket test: size: {}, msgs: {}, delay: {:.1}",
            config.size, config.msgs, config.delay
        )
    } else {
        format!("HTTP test: size: {}, delay: {:.1}", config.size, config.delay)
    }
}

fn summary_line(label: &str, summary: &Summary, decimals: usize) -> String {
    format!(
        "{:<10} mean: {:4.prec$}, 90%: {:4.prec$}, 50%: {:4.prec$}, 10%: {:4.prec$}",
        label,
        summary.mean,
        summary.p90,
        summary.p50,
        summary.p10,
        prec = decimals
    )
}

fn report_text(report: &RunReport) -> (String, String) {
    (
        summary_line("req/sec", &report.requests_per_sec, 0),
        summary_line("ms", &report.milliseconds, 1),
    )
}

/// Plain text formatter for scripts and logs
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, config: &Config) -> String {
        banner_text(config)
    }

    fn format_test_header(&self, config: &Config) -> String {
        test_header_text(config)
    }

    fn format_section(&self, label: &str) -> String {
        label.to_string()
    }

    fn format_report(&self, report: &RunReport) -> String {
        let (rps, ms) = report_text(report);
        format!("{}\n{}", rps, ms)
    }
}

/// Colored console formatter
pub struct ColoredFormatter;

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, config: &Config) -> String {
        banner_text(config).bold().to_string()
    }

    fn format_test_header(&self, config: &Config) -> String {
        test_header_text(config).cyan().to_string()
    }

    fn format_section(&self, label: &str) -> String {
        label.cyan().bold().to_string()
    }

    fn format_report(&self, report: &RunReport) -> String {
        let (rps, ms) = report_text(report);
        format!("{}\n{}", rps, ms)
    }
}

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color preference
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        if enable_color {
            Box::new(ColoredFormatter)
        } else {
            Box::new(PlainFormatter)
        }
    }
}
