// src/core/models.rs

use crate::core::error::ScanError;
use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::{Host, Url};

// --- Target ---

/// Characters left as-is in a single query component; everything else is
/// percent-encoded (a space becomes `%20`, never `+`).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A validated absolute `http`/`https` URL. Probes only ever see targets that
/// went through [`ScanTarget::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    url: Url,
    host: String,
}

impl ScanTarget {
    pub fn parse(raw: &str) -> Result<Self, ScanError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ScanError::EmptyTarget);
        }
        let url = Url::parse(trimmed).map_err(|source| ScanError::InvalidUrl {
            input: trimmed.to_string(),
            source,
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ScanError::UnsupportedScheme(url.scheme().to_string()));
        }
        // Bracket-free form, usable both for socket addresses and TLS SNI.
        let host = match url.host() {
            Some(Host::Domain(d)) if !d.is_empty() => d.to_string(),
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            _ => return Err(ScanError::MissingHost),
        };
        Ok(Self { url, host })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_https(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// Declared port, or the scheme's well-known one.
    pub fn port(&self) -> u16 {
        self.url.port_or_known_default().unwrap_or(443)
    }

    /// Copy of the target URL with `test=<payload>` appended to its query,
    /// the payload percent-encoded as a single component.
    pub fn with_test_param(&self, payload: &str) -> Url {
        let param = format!("test={}", utf8_percent_encode(payload, QUERY_COMPONENT));
        let query = match self.url.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, param),
            _ => param,
        };
        let mut url = self.url.clone();
        url.set_query(Some(&query));
        url
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

// --- Report ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    Open,
    #[default]
    Closed,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortStatus::Open => write!(f, "open"),
            PortStatus::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortReport {
    pub port: u16,
    pub status: PortStatus,
}

/// The aggregate result of one scan. Every field starts at its negative
/// value and stays there when the corresponding probe fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub ssl_valid: bool,
    pub xss_vulnerable: bool,
    pub sql_injection_vulnerable: bool,
    pub missing_headers: Vec<String>,
    pub open_ports: Vec<PortReport>,
}

impl ScanReport {
    pub fn port_status(&self, port: u16) -> Option<PortStatus> {
        self.open_ports.iter().find(|p| p.port == port).map(|p| p.status)
    }
}

// --- Probe diagnostics ---

/// How a single probe ended. Separates "checked, found nothing" from
/// "could not check", which the report fields alone cannot express.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeStatus {
    #[default]
    Succeeded,
    TimedOut,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortDiagnostic {
    pub port: u16,
    pub status: ProbeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProbeDiagnostics {
    pub tls: ProbeStatus,
    pub xss: ProbeStatus,
    pub sql_injection: ProbeStatus,
    pub headers: ProbeStatus,
    pub ports: Vec<PortDiagnostic>,
}

impl ProbeDiagnostics {
    pub fn all_succeeded(&self) -> bool {
        [self.tls, self.xss, self.sql_injection, self.headers]
            .iter()
            .chain(self.ports.iter().map(|p| &p.status))
            .all(|s| *s == ProbeStatus::Succeeded)
    }
}

/// The report together with the per-probe status it was built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScanOutcome {
    pub report: ScanReport,
    pub diagnostics: ProbeDiagnostics,
}

// --- Certificate details ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateInfo {
    pub subject_name: String,
    pub issuer_name: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl CertificateInfo {
    /// True when the certificate expires strictly after `now`.
    pub fn is_current_at(&self, now: DateTime<Utc>) -> bool {
        self.not_after > now
    }
}

// --- Analysis ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisFinding {
    pub severity: Severity,
    pub code: String,
}

impl AnalysisFinding {
    pub fn new(severity: Severity, code: &str) -> Self {
        Self { severity, code: code.to_string() }
    }
}
