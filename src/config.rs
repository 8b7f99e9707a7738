// src/config.rs

use crate::logging::get_config_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_XSS_PAYLOAD: &str = "<script>alert('XSS')</script>";
pub const DEFAULT_SQLI_PAYLOAD: &str = "' OR '1'='1";

/// Immutable settings handed to the scanner at construction time.
///
/// Every field has a default, so a partial `config.json` only overrides the
/// keys it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Ports probed for reachability, reported in this order.
    pub ports: Vec<u16>,
    pub xss_payload: String,
    pub sqli_payload: String,
    /// Substrings whose presence in the SQLi probe's body counts as an indication.
    pub sqli_markers: Vec<String>,
    pub http_timeout_secs: u64,
    pub tls_timeout_secs: u64,
    pub port_timeout_secs: u64,
    pub user_agent: String,
    /// Extra PEM trust anchors for the TLS probe, on top of the platform store.
    pub tls_root_certificates: Vec<PathBuf>,
    /// Lets the reflection and header probes read pages behind a bad
    /// certificate. Certificate validity is judged by the TLS probe alone.
    pub accept_invalid_http_certs: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ports: vec![80, 443],
            xss_payload: DEFAULT_XSS_PAYLOAD.to_string(),
            sqli_payload: DEFAULT_SQLI_PAYLOAD.to_string(),
            sqli_markers: vec!["SQL error".to_string(), "database".to_string()],
            http_timeout_secs: 10,
            tls_timeout_secs: 5,
            port_timeout_secs: 2,
            user_agent: concat!("recon-probe/", env!("CARGO_PKG_VERSION")).to_string(),
            tls_root_certificates: Vec::new(),
            accept_invalid_http_certs: true,
        }
    }
}

impl ScanConfig {
    /// Loads `config.json` from the project config directory, falling back to
    /// the defaults when the file is absent or malformed.
    pub fn load() -> Self {
        Self::load_from(&get_config_dir().join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No config file, using defaults.");
                return Self::default();
            }
        };
        match serde_json::from_str::<ScanConfig>(&raw) {
            Ok(config) => {
                info!(path = %path.display(), ports = ?config.ports, "Loaded scan configuration.");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed config file, using defaults.");
                Self::default()
            }
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    pub fn tls_timeout(&self) -> Duration {
        Duration::from_secs(self.tls_timeout_secs.max(1))
    }

    pub fn port_timeout(&self) -> Duration {
        Duration::from_secs(self.port_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_fixed_battery() {
        let config = ScanConfig::default();
        assert_eq!(config.ports, vec![80, 443]);
        assert_eq!(config.xss_payload, "<script>alert('XSS')</script>");
        assert_eq!(config.sqli_payload, "' OR '1'='1");
        assert_eq!(config.sqli_markers, vec!["SQL error", "database"]);
        assert_eq!(config.port_timeout(), Duration::from_secs(2));
        assert!(config.tls_root_certificates.is_empty());
        assert!(config.accept_invalid_http_certs);
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"ports": [8080, 22], "port_timeout_secs": 1, "tls_root_certificates": ["/etc/ssl/internal-ca.pem"]}}"#
        )
        .unwrap();

        let config = ScanConfig::load_from(file.path());
        assert_eq!(config.ports, vec![8080, 22]);
        assert_eq!(config.port_timeout_secs, 1);
        assert_eq!(config.tls_root_certificates, vec![PathBuf::from("/etc/ssl/internal-ca.pem")]);
        assert_eq!(config.xss_payload, DEFAULT_XSS_PAYLOAD);
    }

    #[test]
    fn malformed_or_missing_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert_eq!(ScanConfig::load_from(file.path()), ScanConfig::default());

        let missing = file.path().with_extension("absent");
        assert_eq!(ScanConfig::load_from(&missing), ScanConfig::default());
    }

    #[test]
    fn zero_timeouts_are_clamped() {
        let config = ScanConfig { http_timeout_secs: 0, ..Default::default() };
        assert_eq!(config.http_timeout(), Duration::from_secs(1));
    }
}
