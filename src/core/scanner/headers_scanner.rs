// src/core/scanner/headers_scanner.rs

use tracing::{debug, info};
use crate::core::error::ProbeResult;
use crate::core::models::ScanTarget;
use reqwest::header::HeaderMap;
use reqwest::Client;

/// Security headers checked, in report order: (lookup key, display name).
pub const SECURITY_HEADERS: [(&str, &str); 2] = [
    ("content-security-policy", "Content-Security-Policy"),
    ("strict-transport-security", "Strict-Transport-Security"),
];

/// Checks for the presence of a specific HTTP header in a `HeaderMap`.
/// `HeaderMap` lookups are case-insensitive.
fn has_header(headers: &HeaderMap, name: &str) -> bool {
    let present = headers.contains_key(name);
    debug!(header_name = name, present, "Checked for header.");
    present
}

/// Lists the security headers absent from `headers` as `"Missing <Header>"`,
/// in the fixed order of [`SECURITY_HEADERS`].
pub fn missing_security_headers(headers: &HeaderMap) -> Vec<String> {
    SECURITY_HEADERS
        .iter()
        .filter(|(key, _)| !has_header(headers, key))
        .map(|(_, display)| format!("Missing {}", display))
        .collect()
}

/// Sends one GET request to the target and reports which security headers
/// the response lacks.
pub async fn run_headers_scan(client: &Client, target: &ScanTarget) -> ProbeResult<Vec<String>> {
    info!(target = %target, "Starting headers scan.");

    let response = client.get(target.url().clone()).send().await?;
    info!(status = %response.status(), "Received HTTP response for headers scan.");

    let missing = missing_security_headers(response.headers());
    info!(missing = missing.len(), "Headers scan finished.");
    Ok(missing)
}
