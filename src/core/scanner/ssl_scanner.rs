// src/core/scanner/ssl_scanner.rs

use tracing::{debug, error, info};

use crate::core::error::{ProbeError, ProbeResult, ScanError};
use crate::core::models::{CertificateInfo, ScanTarget};
use chrono::{DateTime, Utc};
use native_tls::{Certificate, TlsConnector};
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::spawn_blocking;
use x509_parser::prelude::*;

/// Builds the connector used for every handshake: the platform trust store
/// plus any extra PEM anchors.
pub fn build_connector(extra_roots: &[PathBuf]) -> Result<TlsConnector, ScanError> {
    let mut builder = TlsConnector::builder();
    for path in extra_roots {
        let pem = std::fs::read(path)
            .map_err(|e| ScanError::TlsSetup(format!("Cannot read {}: {}", path.display(), e)))?;
        let root = Certificate::from_pem(&pem)
            .map_err(|e| ScanError::TlsSetup(format!("Invalid certificate in {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Added extra TLS root certificate.");
        builder.add_root_certificate(root);
    }
    builder.build().map_err(|e| {
        error!(error = %e, "Failed to create TlsConnector");
        ScanError::TlsSetup(format!("TlsConnector Error: {}", e))
    })
}

/// Checks whether the target serves a certificate that has not yet expired.
///
/// Only `https` targets are probed; any other scheme is reported as `false`
/// without touching the network. The handshake verifies against the
/// connector's trust store, so a rejected certificate also yields `false`.
pub async fn run_ssl_scan(target: &ScanTarget, connector: &TlsConnector, timeout: Duration) -> ProbeResult<bool> {
    if !target.is_https() {
        info!(target = %target, "Target is not served over TLS, skipping certificate check.");
        return Ok(false);
    }

    let host = target.host().to_string();
    let port = target.port();
    info!(host = %host, port, "Starting SSL/TLS scan.");

    debug!("Spawning blocking task for TLS connection.");
    let connector = connector.clone();
    let task = spawn_blocking(move || perform_tls_scan(&connector, &host, port, timeout));

    // Connect and each socket read are bounded individually; this caps the
    // whole exchange including name resolution.
    let certificate = match tokio::time::timeout(timeout * 2, task).await {
        Ok(Ok(result)) => result?,
        Ok(Err(e)) => {
            error!(panic = %e, "Blocking SSL scan task panicked!");
            return Err(ProbeError::Task(e.to_string()));
        }
        Err(_) => return Err(ProbeError::Timeout),
    };

    let is_valid = match &certificate {
        Some(info) => {
            let valid = info.is_current_at(Utc::now());
            debug!(expiry_date = %info.not_after, valid, "Evaluated certificate expiry.");
            valid
        }
        None => false,
    };

    info!(is_valid, "SSL/TLS scan finished.");
    Ok(is_valid)
}

/// Connects to the first reachable address, trying them in resolution order.
/// Returns the last error when none accepts.
fn connect_any(addrs: impl IntoIterator<Item = SocketAddr>, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in addrs {
        debug!(%addr, "Connecting TCP stream.");
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "Address unreachable, trying next.");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")))
}

fn perform_tls_scan(
    connector: &TlsConnector,
    host: &str,
    port: u16,
    timeout: Duration,
) -> ProbeResult<Option<CertificateInfo>> {
    debug!(host, port, "Performing TLS connection and handshake.");

    let stream = connect_any((host, port).to_socket_addrs()?, timeout)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    debug!(host, "Performing TLS handshake.");
    let stream = connector.connect(host, stream).map_err(|e| {
        debug!(error = %e, "TLS handshake failed");
        ProbeError::Tls(format!("TLS Handshake Error: {}", e))
    })?;

    let cert = match stream.peer_certificate() {
        Ok(Some(c)) => c,
        Ok(None) => {
            debug!("TLS connection successful, but no peer certificate provided.");
            return Ok(None);
        }
        Err(e) => return Err(ProbeError::Certificate(format!("Could not get peer certificate: {}", e))),
    };

    let cert_der = cert
        .to_der()
        .map_err(|e| ProbeError::Certificate(format!("Could not convert certificate to DER: {}", e)))?;

    let (_, x509) = parse_x509_certificate(&cert_der)
        .map_err(|e| ProbeError::Certificate(format!("X.509 Parse Error: {}", e)))?;

    info!(subject = %x509.subject(), issuer = %x509.issuer(), "Successfully parsed certificate.");

    let validity = x509.validity();
    Ok(Some(CertificateInfo {
        subject_name: x509.subject().to_string(),
        issuer_name: x509.issuer().to_string(),
        not_before: asn1_time_to_chrono_utc(&validity.not_before),
        not_after: asn1_time_to_chrono_utc(&validity.not_after),
    }))
}

fn asn1_time_to_chrono_utc(time: &ASN1Time) -> DateTime<Utc> {
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or_default()
}
