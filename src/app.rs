//! Top-level run sequencing: bootstrap, two batches, one comparison

use crate::bootstrap::bootstrap;
use crate::config::Config;
use crate::driver::{BatchParams, LoadDriver};
use crate::error::Result;
use crate::logging::{LogLevel, Logger};
use crate::output::OutputFormatterFactory;
use crate::stats::report;
use std::time::Duration;

/// Run the full benchmark: start services, drive the direct batch, drive
/// the proxied batch, and print the comparison.
pub async fn run(config: Config) -> Result<()> {
    let level = if config.debug {
        LogLevel::Debug
    } else if config.verbose {
        LogLevel::Info
    } else {
        LogLevel::Warn
    };
    let logger = Logger::new(level, config.enable_color);
    let formatter = OutputFormatterFactory::create_formatter(config.enable_color);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()?;

    println!("{}", formatter.format_banner(&config));

    let boot = bootstrap(&client, &config, &logger).await?;
    let direct_urls = boot.direct_urls();

    let params = BatchParams::from(&config);
    let mut driver = LoadDriver::new(client.clone(), config.concurrency, logger.clone())?;

    logger.info("app", "running direct batch");
    let baseline = driver.run(&direct_urls, &params).await?;
    logger.info("app", "running proxied batch");
    let proxied = driver.run(&boot.proxied_urls, &params).await?;

    println!("{}", formatter.format_test_header(&config));
    println!(
        "{} workers, {} requests ({} concurrent)",
        config.workers, config.samples, config.concurrency
    );

    println!("{}", formatter.format_section("Bypassing proxy"));
    println!("{}", formatter.format_report(&report(&baseline)?));

    println!("{}", formatter.format_section("Proxied"));
    println!("{}", formatter.format_report(&report(&proxied)?));

    if config.plot {
        println!();
        print!("{}", formatter.format_samples(&baseline, &proxied));
    }

    // Dropping the bootstrap handles terminates the proxy and workers.
    drop(boot);
    Ok(())
}
