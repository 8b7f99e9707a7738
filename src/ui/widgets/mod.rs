// src/ui/widgets/mod.rs

pub mod analysis_view;    // Findings list with details.
pub mod disclaimer_popup; // Shown once at startup.
pub mod footer;           // Key bindings for the current state.
pub mod input;            // Target URL field.
pub mod log_view;         // Tail of the log file.
pub mod summary;          // Score, checks, open ports.
