//! Display model implementations for table, pretty and JSON output

mod common;
mod scan;

pub use scan::{ScanCard, ScanDetail, ScanDisplay};
