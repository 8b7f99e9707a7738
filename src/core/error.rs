// src/core/error.rs

use thiserror::Error;

/// Rejection of the caller's target before any probe runs.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("URL is required")]
    EmptyTarget,

    #[error("Invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("URL has no host to scan")]
    MissingHost,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to set up TLS: {0}")]
    TlsSetup(String),
}

impl ScanError {
    /// Status code reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            ScanError::HttpClient(_) | ScanError::TlsSetup(_) => 500,
            _ => 400,
        }
    }
}

/// A fault inside a single probe. Contained by the orchestrator and never
/// surfaced to the caller.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Probe timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connect(#[from] std::io::Error),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Certificate error: {0}")]
    Certificate(String),

    #[error("Probe task failed: {0}")]
    Task(String),
}

impl ProbeError {
    pub fn is_timeout(&self) -> bool {
        match self {
            ProbeError::Timeout => true,
            ProbeError::Http(e) => e.is_timeout(),
            ProbeError::Connect(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_client_errors() {
        assert_eq!(ScanError::EmptyTarget.status_code(), 400);
        assert_eq!(ScanError::EmptyTarget.to_string(), "URL is required");
        assert_eq!(ScanError::MissingHost.status_code(), 400);
        assert_eq!(ScanError::TlsSetup("bad anchor".into()).status_code(), 500);
    }

    #[test]
    fn timeout_classification() {
        assert!(ProbeError::Timeout.is_timeout());
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        assert!(ProbeError::from(io).is_timeout());
        assert!(!ProbeError::Tls("handshake".into()).is_timeout());
    }
}
