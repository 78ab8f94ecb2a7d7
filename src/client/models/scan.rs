//! Scan models

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Domain;

/// Server-assigned scan identifier
pub type ScanId = i64;

/// Scan lifecycle status, mutated only by the scan service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    /// Wire name of the status (e.g. `COMPLETED`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Pending => "PENDING",
            ScanStatus::Running => "RUNNING",
            ScanStatus::Completed => "COMPLETED",
            ScanStatus::Failed => "FAILED",
        }
    }

    /// Whether the scan has reached a terminal state
    pub fn is_finished(&self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan entity as returned by the scan service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    /// Scan ID
    pub id: ScanId,

    /// Target domain
    pub domain: String,

    /// Scanning technique label
    #[serde(default)]
    pub tool: String,

    /// Lifecycle status
    pub status: ScanStatus,

    /// When the scan started (service timestamp string)
    pub start_time: String,

    /// When the scan finished; only set for COMPLETED/FAILED
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    /// Results payload; only set for COMPLETED/FAILED
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<ScanResults>,

    /// Position in collection views, relative to other scans
    pub display_order: i64,
}

impl Scan {
    /// Number of subdomains found (0 when there are no results)
    pub fn subdomain_count(&self) -> usize {
        self.results
            .as_ref()
            .and_then(|r| r.subdomains.as_ref())
            .map_or(0, Vec::len)
    }

    /// Number of IP addresses found (0 when there are no results)
    pub fn ip_count(&self) -> usize {
        self.results
            .as_ref()
            .and_then(|r| r.ips.as_ref())
            .map_or(0, Vec::len)
    }

    /// Error message reported by the service for a failed scan
    pub fn error_message(&self) -> Option<&str> {
        self.results.as_ref().and_then(|r| r.error.as_deref())
    }
}

/// Scan results payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResults {
    /// Discovered subdomains, in service order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<Vec<String>>,

    /// Resolved IP addresses, in service order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ips: Option<Vec<String>>,

    /// Raw tool output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,

    /// Error message for failed scans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request body for `POST /scans`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanRequest {
    /// Validated target domain
    pub domain: Domain,

    /// Timeout hint in minutes; server default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// Passive-only hint; server default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passive: Option<bool>,
}

impl ScanRequest {
    /// Create a request with server-defined defaults for all hints
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            timeout: None,
            passive: None,
        }
    }

    /// Set the timeout hint (minutes)
    pub fn timeout(mut self, minutes: u32) -> Self {
        self.timeout = Some(minutes);
        self
    }

    /// Set the passive-scan hint
    pub fn passive(mut self, passive: bool) -> Self {
        self.passive = Some(passive);
        self
    }
}

/// Request body for `PUT /scans/order`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDisplayOrderRequest {
    pub scan_id: ScanId,
    pub new_order: i64,
}
