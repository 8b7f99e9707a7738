// src/core/scanner/port_scanner.rs

use tracing::{debug, info, warn};

use crate::core::models::{PortDiagnostic, PortReport, PortStatus, ProbeStatus};
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;

/// Attempts a raw TCP connect to `host:port`.
///
/// Only an established connection counts as `Open`; refusal, timeout and any
/// other socket error all report `Closed`.
pub async fn probe_port(host: &str, port: u16, timeout: Duration) -> PortStatus {
    probe_port_detailed(host, port, timeout).await.0
}

/// Like [`probe_port`], also telling whether the verdict was observed
/// (connected or refused) or inferred from a timeout or error.
pub async fn probe_port_detailed(host: &str, port: u16, timeout: Duration) -> (PortStatus, ProbeStatus) {
    debug!(host, port, "Probing port.");
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => {
            // Terminal state reached; the socket is not needed any further.
            drop(stream);
            debug!(port, "Port is open.");
            (PortStatus::Open, ProbeStatus::Succeeded)
        }
        Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => {
            debug!(port, "Connection refused.");
            (PortStatus::Closed, ProbeStatus::Succeeded)
        }
        Ok(Err(e)) => {
            warn!(port, error = %e, "Port probe failed.");
            (PortStatus::Closed, ProbeStatus::Failed)
        }
        Err(_) => {
            debug!(port, timeout_ms = timeout.as_millis() as u64, "Port probe timed out.");
            (PortStatus::Closed, ProbeStatus::TimedOut)
        }
    }
}

/// Probes every port concurrently. Results follow the order of `ports`,
/// not the order in which the probes complete.
pub async fn run_port_scan(host: &str, ports: &[u16], timeout: Duration) -> Vec<(PortReport, PortDiagnostic)> {
    info!(host, ports = ?ports, "Starting port scan.");

    let handles: Vec<_> = ports
        .iter()
        .map(|&port| {
            let host = host.to_string();
            (port, tokio::spawn(async move { probe_port_detailed(&host, port, timeout).await }))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (port, handle) in handles {
        let (status, probe_status) = handle.await.unwrap_or_else(|e| {
            warn!(port, error = %e, "Port probe task failed.");
            (PortStatus::Closed, ProbeStatus::Failed)
        });
        results.push((PortReport { port, status }, PortDiagnostic { port, status: probe_status }));
    }

    let open = results.iter().filter(|(r, _)| r.status == PortStatus::Open).count();
    info!(open, total = results.len(), "Port scan finished.");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        port
    }

    #[tokio::test]
    async fn listening_port_is_open() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let status = probe_port("127.0.0.1", port, Duration::from_secs(2)).await;
        assert_eq!(status, PortStatus::Open);
    }

    #[tokio::test]
    async fn refused_port_is_closed() {
        let port = closed_port().await;
        let (status, probe_status) = probe_port_detailed("127.0.0.1", port, Duration::from_secs(2)).await;
        assert_eq!(status, PortStatus::Closed);
        assert_eq!(probe_status, ProbeStatus::Succeeded);
    }

    #[tokio::test]
    async fn unresolvable_host_is_closed() {
        let status = probe_port("host.invalid", 80, Duration::from_secs(2)).await;
        assert_eq!(status, PortStatus::Closed);
    }

    #[tokio::test]
    async fn results_follow_configured_order() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open = listener.local_addr().unwrap().port();
        let closed = closed_port().await;

        let results = run_port_scan("127.0.0.1", &[closed, open, closed], Duration::from_secs(2)).await;
        let reports: Vec<PortReport> = results.into_iter().map(|(r, _)| r).collect();
        assert_eq!(reports, vec![
            PortReport { port: closed, status: PortStatus::Closed },
            PortReport { port: open, status: PortStatus::Open },
            PortReport { port: closed, status: PortStatus::Closed },
        ]);
    }

    #[tokio::test]
    async fn empty_port_list_yields_nothing() {
        assert!(run_port_scan("127.0.0.1", &[], Duration::from_secs(1)).await.is_empty());
    }
}
