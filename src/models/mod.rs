//! Display models for CLI output
//!
//! Converts scan service types into CLI-friendly display formats.

pub mod display;

pub use display::{ScanCard, ScanDetail, ScanDisplay};
