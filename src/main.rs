//! Proxy overhead benchmark - CLI entry point

use clap::Parser;
use proxy_bench::{app, cli::Cli, config::load_config, error::AppError, PKG_NAME, VERSION};
use std::process;

#[tokio::main]
async fn main() {
    // Report the panic but let unwinding proceed, so service handles still
    // drop and reap their spawned proxy/worker processes.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
    }));

    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(should_color()));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> proxy_bench::Result<()> {
    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!(
            "Built: {} (commit {})",
            env!("BUILD_TIME"),
            option_env!("GIT_COMMIT").unwrap_or("unknown")
        );
        println!("Debug mode enabled");
        println!();
    }

    let config = load_config(cli)?;

    if config.debug {
        println!("Configuration loaded successfully:");
        println!("  Transport: {}", if config.ws { "websocket" } else { "HTTP" });
        println!("  Samples: {} ({} concurrent)", config.samples, config.concurrency);
        println!("  Workers: {}", config.workers);
        println!("  Proxy command: {}", config.proxy_cmd);
        println!("  Worker command: {}", config.worker_cmd);
        println!("  Timeout: {}s", config.timeout_seconds);
        println!();
    }

    app::run(config).await
}

fn should_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Bootstrap(_) => {
            eprintln!();
            eprintln!("Bootstrap troubleshooting:");
            eprintln!("  - Check that the proxy command is installed and on PATH");
            eprintln!("  - Override commands with --proxy-cmd / --worker-cmd");
            eprintln!("  - PBENCH_PROXY_CMD and PBENCH_WORKER_CMD work too");
        }
        AppError::Readiness(_) => {
            eprintln!();
            eprintln!("Readiness troubleshooting:");
            eprintln!("  - A spawned service never answered on its port");
            eprintln!("  - Check the service's own logs on stderr");
            eprintln!("  - Another process may have grabbed the allocated port; re-run");
        }
        AppError::WebSocket(_) => {
            eprintln!();
            eprintln!("WebSocket troubleshooting:");
            eprintln!("  - The worker must serve a /ws echo endpoint");
            eprintln!("  - Try the HTTP test (drop --ws) to isolate the transport");
        }
        _ => {}
    }
}
