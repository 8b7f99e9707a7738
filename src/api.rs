// src/api.rs

//! Request/response contract consumed by front-ends: `{ "url": ... }` in,
//! the report JSON or `{ "error": ... }` with a status code out.

use crate::core::error::ScanError;
use crate::core::models::{ScanReport, ScanTarget};
use crate::core::scanner::Scanner;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Shape of every non-success response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanResponse {
    pub status: u16,
    pub body: Value,
}

impl ScanResponse {
    fn ok(report: &ScanReport) -> Self {
        match serde_json::to_value(report) {
            Ok(body) => Self { status: 200, body },
            Err(e) => {
                error!(error = %e, "Failed to serialize scan report.");
                Self::error(500, format!("Failed to serialize report: {}", e))
            }
        }
    }

    fn error(status: u16, message: String) -> Self {
        let body = serde_json::json!(ErrorBody { error: message });
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<&ScanError> for ScanResponse {
    fn from(e: &ScanError) -> Self {
        Self::error(e.status_code(), e.to_string())
    }
}

/// Validates the request and, only for a usable target, runs the scan.
pub async fn handle_scan_request(scanner: &Scanner, request: ScanRequest) -> ScanResponse {
    let raw = request.url.unwrap_or_default();
    match ScanTarget::parse(&raw) {
        Ok(target) => ScanResponse::ok(&scanner.scan(&target).await),
        Err(e) => {
            warn!(input = %raw, error = %e, "Rejected scan request.");
            ScanResponse::from(&e)
        }
    }
}

/// Same as [`handle_scan_request`] for a raw JSON request body.
pub async fn handle_scan_json(scanner: &Scanner, body: &str) -> ScanResponse {
    match serde_json::from_str::<ScanRequest>(body) {
        Ok(request) => handle_scan_request(scanner, request).await,
        Err(e) => {
            warn!(error = %e, "Malformed scan request body.");
            ScanResponse::error(400, format!("Malformed request: {}", e))
        }
    }
}
