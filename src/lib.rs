// src/lib.rs

//! Lightweight external reconnaissance probe.
//!
//! The crate exposes the scan engine (`core`), its immutable configuration,
//! the request/response contract used by front-ends, and the plain-text
//! report export. The terminal front-end lives in the binary.

pub mod api;
pub mod config;
pub mod core;
pub mod logging;
pub mod report;
