// src/report.rs

//! Printable export of a finished scan.

use crate::core::models::ScanReport;
use chrono::{DateTime, Local};
use std::fmt::{self, Write as _};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Renders the report as a plain-text document for `target`.
pub fn render_text_report(report: &ScanReport, target: &str, generated_at: DateTime<Local>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, report, target, generated_at);
    out
}

fn write_report(out: &mut String, report: &ScanReport, target: &str, generated_at: DateTime<Local>) -> fmt::Result {
    let title = format!("Security Scan Report for {}", target);
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S %:z"))?;
    writeln!(out)?;

    let ssl = if report.ssl_valid { "Valid" } else { "Invalid" };
    writeln!(out, "{:<28}{}", "SSL/TLS Certificate:", ssl)?;
    writeln!(out, "{:<28}{}", "XSS Vulnerable:", yes_no(report.xss_vulnerable))?;
    writeln!(out, "{:<28}{}", "SQL Injection Vulnerable:", yes_no(report.sql_injection_vulnerable))?;
    writeln!(out)?;

    if report.missing_headers.is_empty() {
        writeln!(out, "{:<28}None", "Missing Security Headers:")?;
    } else {
        writeln!(out, "Missing Security Headers:")?;
        for header in &report.missing_headers {
            writeln!(out, "  - {}", header)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Open Ports:")?;
    if report.open_ports.is_empty() {
        writeln!(out, "  None checked")?;
    }
    for port in &report.open_ports {
        writeln!(out, "  {}: {}", port.port, port.status)?;
    }
    Ok(())
}

/// File name for a report on `target`, keeping only characters safe in paths.
pub fn report_file_name(target: &str) -> String {
    let trimmed = target
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    let sanitized: String = trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    format!("scan_report_{}.txt", sanitized)
}

/// Writes the rendered report into `dir`, creating it if needed, and returns
/// the path of the written file.
pub fn export_report(report: &ScanReport, target: &str, dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(target));
    std::fs::write(&path, render_text_report(report, target, Local::now()))?;
    info!(path = %path.display(), "Exported scan report.");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{PortReport, PortStatus};

    fn sample() -> ScanReport {
        ScanReport {
            ssl_valid: true,
            xss_vulnerable: false,
            sql_injection_vulnerable: true,
            missing_headers: vec!["Missing Strict-Transport-Security".into()],
            open_ports: vec![
                PortReport { port: 80, status: PortStatus::Open },
                PortReport { port: 443, status: PortStatus::Closed },
            ],
        }
    }

    #[test]
    fn renders_every_field() {
        let text = render_text_report(&sample(), "https://example.com", Local::now());
        assert!(text.starts_with("Security Scan Report for https://example.com\n"));
        assert!(text.contains("SSL/TLS Certificate:        Valid"));
        assert!(text.contains("XSS Vulnerable:             No"));
        assert!(text.contains("SQL Injection Vulnerable:   Yes"));
        assert!(text.contains("  - Missing Strict-Transport-Security"));
        assert!(text.contains("  80: open\n  443: closed"));
    }

    #[test]
    fn underline_matches_title_width() {
        let text = render_text_report(&sample(), "https://example.com", Local::now());
        let mut lines = text.lines();
        let title = lines.next().unwrap();
        assert_eq!(lines.next().unwrap(), "=".repeat(title.len()));
        assert!(text.ends_with("  443: closed\n"));
    }

    #[test]
    fn no_missing_headers_reads_none() {
        let report = ScanReport { missing_headers: vec![], ..sample() };
        let text = render_text_report(&report, "https://example.com", Local::now());
        assert!(text.contains("Missing Security Headers:   None"));
    }

    #[test]
    fn file_name_is_path_safe() {
        assert_eq!(report_file_name("https://example.com/a/b?x=1"), "scan_report_example.com_a_b_x_1.txt");
        assert_eq!(report_file_name("http://127.0.0.1:8080/"), "scan_report_127.0.0.1_8080.txt");
    }

    #[test]
    fn export_writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_report(&sample(), "https://example.com", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("scan_report_example.com.txt"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Open Ports:"));
    }
}
