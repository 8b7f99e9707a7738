// src/core/scanner/reflection_scanner.rs

use tracing::{debug, info};

use crate::core::error::ProbeResult;
use crate::core::models::ScanTarget;
use reqwest::Client;

/// Sends `payload` as the `test` query parameter and applies `predicate` to
/// the response body.
///
/// The body is inspected whatever the status code; an error page can leak
/// exactly what the predicate looks for. Only transport failures are errors.
pub async fn probe_reflection<F>(
    client: &Client,
    target: &ScanTarget,
    payload: &str,
    predicate: F,
) -> ProbeResult<bool>
where
    F: Fn(&str) -> bool,
{
    let url = target.with_test_param(payload);
    debug!(url = %url, "Sending reflection probe.");

    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    let matched = predicate(&body);
    debug!(status = %status, body_len = body.len(), matched, "Reflection probe answered.");
    Ok(matched)
}

/// Unescaped reflection: the body contains the payload verbatim.
pub async fn run_xss_scan(client: &Client, target: &ScanTarget, payload: &str) -> ProbeResult<bool> {
    info!(target = %target, "Starting XSS reflection scan.");
    let indicated = probe_reflection(client, target, payload, |body| reflects_verbatim(body, payload)).await?;
    info!(indicated, "XSS reflection scan finished.");
    Ok(indicated)
}

/// Error disclosure: the body mentions any of the configured markers.
pub async fn run_sqli_scan(
    client: &Client,
    target: &ScanTarget,
    payload: &str,
    markers: &[String],
) -> ProbeResult<bool> {
    info!(target = %target, "Starting SQL injection scan.");
    let indicated = probe_reflection(client, target, payload, |body| mentions_any(body, markers)).await?;
    info!(indicated, "SQL injection scan finished.");
    Ok(indicated)
}

fn reflects_verbatim(body: &str, payload: &str) -> bool {
    body.contains(payload)
}

fn mentions_any(body: &str, markers: &[String]) -> bool {
    markers.iter().any(|marker| body.contains(marker.as_str()))
}
