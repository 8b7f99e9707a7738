// src/core/mod.rs

/// Data structures shared by the probes and the front-ends: `ScanTarget`,
/// `ScanReport`, per-probe status and analysis findings.
pub mod models;

/// Typed errors for target validation and for faults inside a probe.
pub mod error;

/// The scan orchestrator and the individual probes (TLS, reflection,
/// headers, ports).
pub mod scanner;

/// Static finding details and the analysis that derives findings from a report.
pub mod knowledge_base;
