//! Service bootstrap orchestration
//!
//! Strictly sequential startup: allocate ports, launch the proxy, gate on
//! its public and management URLs, then for each worker launch, gate, and
//! register a route under `/worker/<port>/`, and finally read back the
//! routing table. Any readiness timeout or management-API failure along the
//! way aborts the whole run; partially registered routes are cleaned up only
//! by the spawned processes dying with their handles.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::logging::Logger;
use crate::models::{RouteTable, RouteTarget};
use crate::ports::random_ports;
use crate::readiness::wait_until_up;
use std::process::{Child, Command, Stdio};

/// A spawned proxy or worker process, terminated when the handle drops.
///
/// The kill in `Drop` runs on every exit path, so a failed bootstrap or a
/// probe error mid-run still tears the processes down.
#[derive(Debug)]
pub struct ServiceHandle {
    label: String,
    child: Child,
}

impl ServiceHandle {
    /// Spawn `command_line` (split on whitespace, so "python3 worker.py"
    /// works) with `extra_args` appended.
    pub fn spawn(label: &str, command_line: &str, extra_args: &[String]) -> Result<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            AppError::config(format!("empty command configured for {}", label))
        })?;

        let child = Command::new(program)
            .args(parts)
            .args(extra_args)
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                AppError::bootstrap(format!(
                    "failed to spawn {} ('{}'): {}",
                    label, command_line, e
                ))
            })?;

        Ok(Self {
            label: label.to_string(),
            child,
        })
    }

    /// OS process id of the spawned service
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Label this handle was spawned under
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for ServiceHandle {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// A running proxy with its two endpoints
pub struct ProxyHandle {
    /// Public forwarding URL
    pub public_url: String,
    /// Management API URL
    pub api_url: String,
    _service: ServiceHandle,
}

/// Everything a finished bootstrap yields
pub struct Bootstrapped {
    /// One proxy-fronted URL per worker prefix
    pub proxied_urls: Vec<String>,
    /// The proxy's routing table, fetched once after registration
    pub routes: RouteTable,
    /// The running proxy (held for its lifetime side effect)
    pub proxy: ProxyHandle,
    /// The running workers (held for their lifetime side effect)
    pub workers: Vec<ServiceHandle>,
}

impl Bootstrapped {
    /// Direct backend URLs, read out of the routing table
    pub fn direct_urls(&self) -> Vec<String> {
        self.routes.values().map(|r| r.target.clone()).collect()
    }
}

/// Deterministic route prefix for a worker on `port`
pub fn worker_prefix(port: u16) -> String {
    format!("/worker/{}/", port)
}

/// Launch the proxy on `port`/`api_port` and block until both URLs respond.
pub async fn start_proxy(
    client: &reqwest::Client,
    config: &Config,
    port: u16,
    api_port: u16,
    logger: &Logger,
) -> Result<ProxyHandle> {
    let args = vec![format!("--port={}", port), format!("--api-port={}", api_port)];
    let service = ServiceHandle::spawn("proxy", &config.proxy_cmd, &args)?;
    logger.info(
        "bootstrap",
        &format!("proxy spawned (pid {}), port {}, api port {}", service.pid(), port, api_port),
    );

    let public_url = format!("http://127.0.0.1:{}", port);
    let api_url = format!("http://127.0.0.1:{}", api_port);
    wait_until_up(client, &public_url).await?;
    wait_until_up(client, &api_url).await?;
    logger.debug("bootstrap", &format!("proxy ready at {}", public_url));

    Ok(ProxyHandle {
        public_url,
        api_url,
        _service: service,
    })
}

/// Launch one worker on `port` and block until it responds.
pub async fn start_worker(
    client: &reqwest::Client,
    config: &Config,
    port: u16,
    logger: &Logger,
) -> Result<ServiceHandle> {
    let args = vec![format!("--port={}", port)];
    let service = ServiceHandle::spawn("worker", &config.worker_cmd, &args)?;
    logger.info(
        "bootstrap",
        &format!("worker spawned (pid {}), port {}", service.pid(), port),
    );

    wait_until_up(client, &format!("http://127.0.0.1:{}", port)).await?;
    Ok(service)
}

/// Register `prefix -> target` with the proxy's management API.
pub async fn register_route(
    client: &reqwest::Client,
    api_url: &str,
    prefix: &str,
    target: &str,
) -> Result<()> {
    let response = client
        .post(format!("{}/api/routes{}", api_url, prefix))
        .json(&RouteTarget {
            target: target.to_string(),
        })
        .send()
        .await?;
    response.error_for_status().map_err(|e| {
        AppError::bootstrap(format!("route registration for {} failed: {}", prefix, e))
    })?;
    Ok(())
}

/// Fetch the proxy's full routing table.
pub async fn fetch_routes(client: &reqwest::Client, api_url: &str) -> Result<RouteTable> {
    let response = client
        .get(format!("{}/api/routes", api_url))
        .send()
        .await?
        .error_for_status()
        .map_err(|e| AppError::bootstrap(format!("route table fetch failed: {}", e)))?;
    Ok(response.json::<RouteTable>().await?)
}

/// Start the proxy and `config.workers` workers, register a route per
/// worker, and return the proxied URLs plus the routing table.
pub async fn bootstrap(
    client: &reqwest::Client,
    config: &Config,
    logger: &Logger,
) -> Result<Bootstrapped> {
    let mut ports = random_ports(config.workers + 2)?;
    let api_port = ports.pop().ok_or_else(|| AppError::port("port allocation came up short"))?;
    let port = ports.pop().ok_or_else(|| AppError::port("port allocation came up short"))?;

    let proxy = start_proxy(client, config, port, api_port, logger).await?;

    let mut proxied_urls = Vec::with_capacity(config.workers);
    let mut workers = Vec::with_capacity(config.workers);
    for worker_port in ports {
        let worker = start_worker(client, config, worker_port, logger).await?;
        let prefix = worker_prefix(worker_port);
        let target = format!("http://127.0.0.1:{}", worker_port);
        register_route(client, &proxy.api_url, &prefix, &target).await?;
        logger.debug(
            "bootstrap",
            &format!("registered route {} -> {}", prefix, target),
        );
        proxied_urls.push(format!("{}{}", proxy.public_url, prefix));
        workers.push(worker);
    }

    let routes = fetch_routes(client, &proxy.api_url).await?;
    logger.info(
        "bootstrap",
        &format!("{} route(s) registered, bootstrap complete", routes.len()),
    );

    Ok(Bootstrapped {
        proxied_urls,
        routes,
        proxy,
        workers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_prefix() {
        assert_eq!(worker_prefix(8123), "/worker/8123/");
    }

    #[test]
    fn test_spawn_rejects_empty_command() {
        let err = ServiceHandle::spawn("proxy", "   ", &[]).unwrap_err();
        assert_eq!(err.category(), "CONFIG");
    }

    #[test]
    fn test_spawn_missing_binary_is_bootstrap_error() {
        let err = ServiceHandle::spawn(
            "proxy",
            "definitely-not-a-real-binary-pbench",
            &["--port=1".to_string()],
        )
        .unwrap_err();
        assert_eq!(err.category(), "BOOTSTRAP");
    }

    #[test]
    fn test_handle_kills_child_on_drop() {
        let handle = ServiceHandle::spawn("worker", "sleep 600", &[]).unwrap();
        let pid = handle.pid();
        drop(handle);

        // Drop kills and reaps, so the pid must be gone.
        assert!(!process_exists(pid));
    }

    #[test]
    fn test_handle_reaps_child_during_unwind() {
        let handle = ServiceHandle::spawn("worker", "sleep 600", &[]).unwrap();
        let pid = handle.pid();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _held = handle;
            panic!("mid-run failure");
        }));

        assert!(result.is_err());
        assert!(!process_exists(pid));
    }

    #[cfg(target_os = "linux")]
    fn process_exists(pid: u32) -> bool {
        std::path::Path::new(&format!("/proc/{}", pid)).exists()
    }

    #[cfg(not(target_os = "linux"))]
    fn process_exists(_pid: u32) -> bool {
        false
    }
}
