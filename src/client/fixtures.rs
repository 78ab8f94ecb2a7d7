//! Test fixtures and builders for scan model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{Scan, ScanId, ScanResults, ScanStatus};

/// Builder for creating test Scan instances.
///
/// # Example
/// ```ignore
/// let scan = ScanBuilder::new(1)
///     .domain("example.com")
///     .order(0)
///     .completed(vec!["a.example.com"], vec!["10.0.0.1"])
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ScanBuilder {
    scan: Scan,
}

impl ScanBuilder {
    /// Create a PENDING scan with the given ID; display order defaults to the ID.
    pub fn new(id: ScanId) -> Self {
        Self {
            scan: Scan {
                id,
                domain: format!("scan-{}.example.com", id),
                tool: "subfinder".to_string(),
                status: ScanStatus::Pending,
                start_time: "2024-05-01T10:00:00".to_string(),
                end_time: None,
                results: None,
                display_order: id,
            },
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.scan.domain = domain.into();
        self
    }

    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.scan.tool = tool.into();
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.scan.display_order = order;
        self
    }

    pub fn status(mut self, status: ScanStatus) -> Self {
        self.scan.status = status;
        self
    }

    pub fn start_time(mut self, start_time: impl Into<String>) -> Self {
        self.scan.start_time = start_time.into();
        self
    }

    /// Mark as COMPLETED with the given subdomains and IPs.
    pub fn completed(mut self, subdomains: Vec<&str>, ips: Vec<&str>) -> Self {
        self.scan.status = ScanStatus::Completed;
        self.scan.end_time = Some("2024-05-01T10:05:00".to_string());
        self.scan.results = Some(ScanResults {
            subdomains: Some(subdomains.into_iter().map(String::from).collect()),
            ips: Some(ips.into_iter().map(String::from).collect()),
            raw_output: Some("raw tool output".to_string()),
            error: None,
        });
        self
    }

    /// Mark as FAILED with the given error message.
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.scan.status = ScanStatus::Failed;
        self.scan.end_time = Some("2024-05-01T10:00:30".to_string());
        self.scan.results = Some(ScanResults {
            error: Some(error.into()),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> Scan {
        self.scan
    }
}

/// Two scans `[{id:1, order:0}, {id:2, order:1}]`.
pub fn two_scans() -> Vec<Scan> {
    vec![
        ScanBuilder::new(1).domain("example.com").order(0).build(),
        ScanBuilder::new(2).domain("example.org").order(1).build(),
    ]
}
