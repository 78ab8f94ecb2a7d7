//! Scan service data models
//!
//! Wire types exchanged with the scan service, plus the validated
//! [`Domain`] used to build create requests.

mod domain;
mod scan;

pub use domain::Domain;
pub use scan::{Scan, ScanId, ScanRequest, ScanStatus, UpdateDisplayOrderRequest};
#[cfg(test)]
pub use scan::ScanResults;
