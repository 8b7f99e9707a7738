//! Static, read-only database of every finding the probe can raise, with a
//! human-readable explanation and remediation for each, plus the analysis
//! that turns a `ScanReport` into a list of findings.

use crate::core::models::{AnalysisFinding, PortStatus, ScanReport, Severity};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// High-level categories used to group findings in the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingCategory {
    Tls,
    Injection,
    Http,
    Network,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::Tls => write!(f, "SSL/TLS Certificate"),
            FindingCategory::Injection => write!(f, "Injection Indicators"),
            FindingCategory::Http => write!(f, "HTTP Security Headers"),
            FindingCategory::Network => write!(f, "Network Exposure"),
        }
    }
}

/// All the detail needed to present a finding to a user.
pub struct FindingDetail {
    /// Machine-readable identifier (e.g., "HEADERS_CSP_MISSING").
    pub code: &'static str,
    pub title: &'static str,
    pub category: FindingCategory,
    pub severity: Severity,
    /// What the finding means and why it matters.
    pub description: &'static str,
    /// Steps the user can take to fix the issue.
    pub remediation: &'static str,
}

static FINDINGS: &[FindingDetail] = &[
    // --- SSL/TLS ---
    FindingDetail {
        code: "SSL_INVALID",
        title: "No Valid TLS Certificate",
        category: FindingCategory::Tls,
        severity: Severity::Critical,
        description: "The scanner could not retrieve a currently valid certificate. The site may not be served over HTTPS, the handshake may have failed, or the certificate has expired or is not trusted.",
        remediation: "Serve the site over HTTPS with a certificate issued by a trusted authority and renew it before it expires. Automated renewal (e.g. ACME) avoids lapses."
    },
    // --- Injection indicators ---
    FindingDetail {
        code: "XSS_REFLECTED",
        title: "Script Payload Reflected Unescaped",
        category: FindingCategory::Injection,
        severity: Severity::Critical,
        description: "A script tag sent in a query parameter came back verbatim in the page. This is a heuristic signal of reflected Cross-Site Scripting, not proof of exploitability: the page may echo input in a context where it is inert.",
        remediation: "HTML-encode every piece of user input before writing it into a page, and add a Content-Security-Policy that forbids inline scripts."
    },
    FindingDetail {
        code: "SQLI_ERROR_DISCLOSURE",
        title: "Database Error Text in Response",
        category: FindingCategory::Injection,
        severity: Severity::Critical,
        description: "After sending a tautological SQL clause, the response mentioned SQL errors or the database. This may indicate unsanitized input reaching a query, or simply verbose error pages. Treat it as a lead, not a confirmed vulnerability.",
        remediation: "Use parameterized queries everywhere and return generic error pages that do not reveal backend details."
    },
    // --- HTTP headers ---
    FindingDetail {
        code: "HEADERS_CSP_MISSING",
        title: "CSP Header Missing",
        category: FindingCategory::Http,
        severity: Severity::Warning,
        description: "Content-Security-Policy defines which resources a browser may load. Without it, injected scripts run with the full privileges of the page.",
        remediation: "Add a Content-Security-Policy header that lists trusted sources for scripts, styles and other assets. Start restrictive and open it up as needed."
    },
    FindingDetail {
        code: "HEADERS_HSTS_MISSING",
        title: "HSTS Header Missing",
        category: FindingCategory::Http,
        severity: Severity::Warning,
        description: "Strict-Transport-Security tells browsers to only use HTTPS for the site, protecting against protocol downgrade attacks and cookie hijacking.",
        remediation: "Add 'Strict-Transport-Security: max-age=31536000; includeSubDomains' to HTTPS responses."
    },
    // --- Network ---
    FindingDetail {
        code: "PORT_HTTP_OPEN",
        title: "Plain HTTP Port Open",
        category: FindingCategory::Network,
        severity: Severity::Info,
        description: "Port 80 accepts connections. This is normal when it only redirects to HTTPS, but any content served there travels unencrypted.",
        remediation: "Make port 80 answer with a permanent redirect to HTTPS and enable HSTS so browsers stop using it."
    },
];

static FINDING_INDEX: Lazy<HashMap<&'static str, &'static FindingDetail>> =
    Lazy::new(|| FINDINGS.iter().map(|f| (f.code, f)).collect());

/// Retrieves the full detail for a finding code, or `None` if it is unknown.
pub fn get_finding_detail(code: &str) -> Option<&'static FindingDetail> {
    FINDING_INDEX.get(code).copied()
}

/// Derives the findings implied by a report, in report-field order.
pub fn analyze_report(report: &ScanReport) -> Vec<AnalysisFinding> {
    let mut findings = Vec::new();

    if !report.ssl_valid {
        findings.push(AnalysisFinding::new(Severity::Critical, "SSL_INVALID"));
    }
    if report.xss_vulnerable {
        findings.push(AnalysisFinding::new(Severity::Critical, "XSS_REFLECTED"));
    }
    if report.sql_injection_vulnerable {
        findings.push(AnalysisFinding::new(Severity::Critical, "SQLI_ERROR_DISCLOSURE"));
    }
    for header in &report.missing_headers {
        match header.as_str() {
            "Missing Content-Security-Policy" => {
                findings.push(AnalysisFinding::new(Severity::Warning, "HEADERS_CSP_MISSING"))
            }
            "Missing Strict-Transport-Security" => {
                findings.push(AnalysisFinding::new(Severity::Warning, "HEADERS_HSTS_MISSING"))
            }
            _ => {}
        }
    }
    if report.port_status(80) == Some(PortStatus::Open) {
        findings.push(AnalysisFinding::new(Severity::Info, "PORT_HTTP_OPEN"));
    }

    findings
}

/// Overall score: 100 minus 15 per critical and 5 per warning, floored at 0.
pub fn score(findings: &[AnalysisFinding]) -> u8 {
    let penalty: usize = findings
        .iter()
        .map(|f| match f.severity {
            Severity::Critical => 15,
            Severity::Warning => 5,
            Severity::Info => 0,
        })
        .sum();
    100usize.saturating_sub(penalty) as u8
}
