//! Scan service API client

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod recon;

pub use models::{Domain, Scan, ScanId, ScanRequest, ScanStatus};
pub use recon::{DEFAULT_API_URL, ReconClient};

/// Request/response operations offered by the remote scan service.
///
/// Every call fails with [`ApiError::Transport`](crate::error::ApiError::Transport)
/// when the exchange itself fails and [`ApiError::Service`](crate::error::ApiError::Service)
/// on a non-success status.
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// Fetch the full scan collection (no paging)
    async fn list_scans(&self) -> Result<Vec<Scan>>;

    /// Fetch one scan; `NotFound` when the service has no such id
    async fn get_scan(&self, id: ScanId) -> Result<Scan>;

    /// Start a new scan and return it with its server-assigned id
    async fn create_scan(&self, request: &ScanRequest) -> Result<Scan>;

    /// Ask the service to move a scan to `new_order`.
    ///
    /// Only the target position is sent; renumbering the other scans is the
    /// service's job.
    async fn set_display_order(&self, id: ScanId, new_order: i64) -> Result<()>;

    /// Liveness payload, informational only
    async fn health(&self) -> Result<serde_json::Value>;
}
