// src/core/scanner/mod.rs

// Each sub-module is one independent probe; this file owns the orchestration.
pub mod headers_scanner;
pub mod port_scanner;
pub mod reflection_scanner;
pub mod ssl_scanner;

use crate::config::ScanConfig;
use crate::core::error::{ProbeResult, ScanError};
use crate::core::models::{ProbeDiagnostics, ProbeStatus, ScanOutcome, ScanReport, ScanTarget};
use native_tls::TlsConnector;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the fixed battery of probes against one target.
///
/// Holds the immutable configuration, one HTTP client shared by the
/// reflection and header probes, and the TLS probe's connector. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: Arc<ScanConfig>,
    client: Client,
    tls: TlsConnector,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.http_timeout())
            .connect_timeout(config.http_timeout())
            .danger_accept_invalid_certs(config.accept_invalid_http_certs)
            .build()
            .map_err(ScanError::HttpClient)?;
        let tls = ssl_scanner::build_connector(&config.tls_root_certificates)?;
        Ok(Self { config: Arc::new(config), client, tls })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans a validated target. Never fails: a probe that cannot complete
    /// leaves its report field at the negative default.
    pub async fn scan(&self, target: &ScanTarget) -> ScanReport {
        self.scan_detailed(target).await.report
    }

    /// Executes all probes concurrently and aggregates them into one report,
    /// keeping the per-probe status alongside.
    ///
    /// Every probe is bounded by its own timeout (HTTP client, TLS and
    /// per-port), so the scan takes roughly as long as the slowest probe.
    pub async fn scan_detailed(&self, target: &ScanTarget) -> ScanOutcome {
        info!(target = %target, "Starting full scan.");
        let config = &self.config;

        let (tls, xss, sqli, headers, ports) = tokio::join!(
            ssl_scanner::run_ssl_scan(target, &self.tls, config.tls_timeout()),
            reflection_scanner::run_xss_scan(&self.client, target, &config.xss_payload),
            reflection_scanner::run_sqli_scan(&self.client, target, &config.sqli_payload, &config.sqli_markers),
            headers_scanner::run_headers_scan(&self.client, target),
            port_scanner::run_port_scan(target.host(), &config.ports, config.port_timeout()),
        );

        let (ssl_valid, tls_status) = contain("tls", tls);
        let (xss_vulnerable, xss_status) = contain("xss", xss);
        let (sql_injection_vulnerable, sqli_status) = contain("sql_injection", sqli);
        let (missing_headers, headers_status) = contain("headers", headers);
        let (open_ports, port_diagnostics): (Vec<_>, Vec<_>) = ports.into_iter().unzip();

        let outcome = ScanOutcome {
            report: ScanReport {
                ssl_valid,
                xss_vulnerable,
                sql_injection_vulnerable,
                missing_headers,
                open_ports,
            },
            diagnostics: ProbeDiagnostics {
                tls: tls_status,
                xss: xss_status,
                sql_injection: sqli_status,
                headers: headers_status,
                ports: port_diagnostics,
            },
        };

        info!(
            complete = outcome.diagnostics.all_succeeded(),
            ssl_valid = outcome.report.ssl_valid,
            xss = outcome.report.xss_vulnerable,
            sqli = outcome.report.sql_injection_vulnerable,
            missing_headers = outcome.report.missing_headers.len(),
            "Full scan finished."
        );
        outcome
    }
}

/// Maps a probe fault to the probe's negative default, logging it for operators.
fn contain<T: Default>(probe: &'static str, result: ProbeResult<T>) -> (T, ProbeStatus) {
    match result {
        Ok(value) => (value, ProbeStatus::Succeeded),
        Err(e) => {
            let status = if e.is_timeout() { ProbeStatus::TimedOut } else { ProbeStatus::Failed };
            warn!(probe, error = %e, ?status, "Probe failed, reporting negative default.");
            (T::default(), status)
        }
    }
}

/// Validates `raw` and, only if it is a usable target, runs the full scan.
///
/// An empty or unparsable target is rejected before any network I/O.
pub async fn run_full_scan(raw: &str, config: ScanConfig) -> Result<ScanReport, ScanError> {
    let target = ScanTarget::parse(raw).inspect_err(|e| {
        warn!(input = raw, error = %e, "Rejected scan target.");
    })?;
    let scanner = Scanner::new(config)?;
    Ok(scanner.scan(&target).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ProbeError;

    #[test]
    fn contain_maps_faults_to_defaults() {
        let (value, status) = contain::<bool>("tls", Err(ProbeError::Timeout));
        assert!(!value);
        assert_eq!(status, ProbeStatus::TimedOut);

        let (value, status) = contain::<Vec<String>>("headers", Err(ProbeError::Tls("boom".into())));
        assert!(value.is_empty());
        assert_eq!(status, ProbeStatus::Failed);

        let (value, status) = contain("xss", Ok(true));
        assert!(value);
        assert_eq!(status, ProbeStatus::Succeeded);
    }

    #[tokio::test]
    async fn invalid_target_short_circuits() {
        let err = run_full_scan("not a url", ScanConfig::default()).await.unwrap_err();
        assert!(matches!(err, ScanError::InvalidUrl { .. }));
        assert_eq!(err.status_code(), 400);

        let err = run_full_scan("", ScanConfig::default()).await.unwrap_err();
        assert!(matches!(err, ScanError::EmptyTarget));
    }

    #[test]
    fn missing_root_certificate_fails_construction() {
        let config = ScanConfig {
            tls_root_certificates: vec!["/nonexistent/recon-probe-ca.pem".into()],
            ..Default::default()
        };
        let err = Scanner::new(config).unwrap_err();
        assert!(matches!(err, ScanError::TlsSetup(_)));
        assert_eq!(err.status_code(), 500);
    }
}
