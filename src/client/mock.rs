//! Mock scan service client for testing
//!
//! Behaves like a small in-memory scan service: it hands out ids and display
//! orders on create, renumbers on reorder, and records every call so tests can
//! assert on exactly which requests were issued and in what order.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::ScanApi;
use super::models::{Scan, ScanId, ScanRequest, ScanStatus};
use crate::error::{ApiError, Result};

/// Operations the mock can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListScans,
    GetScan,
    CreateScan,
    SetDisplayOrder,
    Health,
}

/// A recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListScans,
    GetScan(ScanId),
    CreateScan(String),
    SetDisplayOrder { id: ScanId, new_order: i64 },
    Health,
}

impl Call {
    fn operation(&self) -> Operation {
        match self {
            Call::ListScans => Operation::ListScans,
            Call::GetScan(_) => Operation::GetScan,
            Call::CreateScan(_) => Operation::CreateScan,
            Call::SetDisplayOrder { .. } => Operation::SetDisplayOrder,
            Call::Health => Operation::Health,
        }
    }
}

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockScanClient::new()
///     .with_scans(two_scans())
///     .await
///     .with_error_on(Operation::ListScans, ApiError::Transport("down".into()))
///     .await;
/// ```
#[derive(Default)]
pub struct MockScanClient {
    /// Server-side collection
    scans: Arc<Mutex<Vec<Scan>>>,
    /// One-shot errors keyed by operation, consumed on first matching call
    errors: Arc<Mutex<HashMap<Operation, ApiError>>>,
    /// Every call, in the order it was made
    calls: Arc<Mutex<Vec<Call>>>,
    /// Operations whose calls never complete
    hung: Arc<Mutex<HashSet<Operation>>>,
}

impl MockScanClient {
    /// Create a mock with an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the server-side collection.
    pub async fn with_scans(self, scans: Vec<Scan>) -> Self {
        *self.scans.lock().await = scans;
        self
    }

    /// Fail the next call of `operation` with `error`.
    pub async fn with_error_on(self, operation: Operation, error: ApiError) -> Self {
        self.errors.lock().await.insert(operation, error);
        self
    }

    /// Queue a failure after construction (e.g. between two store calls).
    pub async fn fail_next(&self, operation: Operation, error: ApiError) {
        self.errors.lock().await.insert(operation, error);
    }

    /// Make every later call of `operation` wait forever (a request that
    /// never gets a response).
    pub async fn hang_on(&self, operation: Operation) {
        self.hung.lock().await.insert(operation);
    }

    /// Let calls of `operation` complete again.
    pub async fn release(&self, operation: Operation) {
        self.hung.lock().await.remove(&operation);
    }

    /// Replace the server-side collection (simulates another client's edits).
    pub async fn set_scans(&self, scans: Vec<Scan>) {
        *self.scans.lock().await = scans;
    }

    /// All recorded calls, oldest first.
    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    /// Number of calls of one operation.
    pub async fn count(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.operation() == operation)
            .count()
    }

    /// Record the call and return the queued error for it, if any.
    async fn record(&self, call: Call) -> Result<()> {
        let operation = call.operation();
        self.calls.lock().await.push(call);

        if self.hung.lock().await.contains(&operation) {
            std::future::pending::<()>().await;
        }

        match self.errors.lock().await.remove(&operation) {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn sorted(scans: &[Scan]) -> Vec<Scan> {
        let mut sorted = scans.to_vec();
        sorted.sort_by_key(|s| s.display_order);
        sorted
    }
}

#[async_trait]
impl ScanApi for MockScanClient {
    async fn list_scans(&self) -> Result<Vec<Scan>> {
        self.record(Call::ListScans).await?;
        Ok(Self::sorted(&self.scans.lock().await))
    }

    async fn get_scan(&self, id: ScanId) -> Result<Scan> {
        self.record(Call::GetScan(id)).await?;
        self.scans
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()).into())
    }

    async fn create_scan(&self, request: &ScanRequest) -> Result<Scan> {
        self.record(Call::CreateScan(request.domain.to_string())).await?;

        let mut scans = self.scans.lock().await;
        let id = scans.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let display_order = scans
            .iter()
            .map(|s| s.display_order + 1)
            .max()
            .unwrap_or(0);

        let scan = Scan {
            id,
            domain: request.domain.to_string(),
            tool: "subfinder".to_string(),
            status: ScanStatus::Pending,
            start_time: chrono::Utc::now().to_rfc3339(),
            end_time: None,
            results: None,
            display_order,
        };
        scans.push(scan.clone());
        Ok(scan)
    }

    async fn set_display_order(&self, id: ScanId, new_order: i64) -> Result<()> {
        self.record(Call::SetDisplayOrder { id, new_order }).await?;

        let mut scans = self.scans.lock().await;
        let mut ordered = Self::sorted(&scans);

        let from = ordered
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        let to = ordered
            .iter()
            .position(|s| s.display_order == new_order)
            .unwrap_or(ordered.len() - 1);

        let moved = ordered.remove(from);
        let to = to.min(ordered.len());
        ordered.insert(to, moved);

        for (position, scan) in ordered.iter_mut().enumerate() {
            scan.display_order = position as i64;
        }
        *scans = ordered;
        Ok(())
    }

    async fn health(&self) -> Result<serde_json::Value> {
        self.record(Call::Health).await?;
        Ok(serde_json::json!({ "status": "UP" }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Domain;
    use crate::client::fixtures::{ScanBuilder, two_scans};

    #[tokio::test]
    async fn test_list_returns_scans_in_display_order() {
        let mock = MockScanClient::new()
            .with_scans(vec![
                ScanBuilder::new(1).order(5).build(),
                ScanBuilder::new(2).order(1).build(),
            ])
            .await;

        let scans = mock.list_scans().await.unwrap();
        let ids: Vec<_> = scans.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_one_shot_error_is_consumed() {
        let mock = MockScanClient::new()
            .with_error_on(Operation::ListScans, ApiError::Transport("down".into()))
            .await;

        assert!(mock.list_scans().await.is_err());
        assert!(mock.list_scans().await.is_ok());
        assert_eq!(mock.count(Operation::ListScans).await, 2);
    }

    #[tokio::test]
    async fn test_create_assigns_next_id_and_order() {
        let mock = MockScanClient::new().with_scans(two_scans()).await;
        let request = ScanRequest::new(Domain::parse("example.net").unwrap());

        let scan = mock.create_scan(&request).await.unwrap();

        assert_eq!(scan.id, 3);
        assert_eq!(scan.display_order, 2);
        assert_eq!(scan.status, ScanStatus::Pending);
    }

    #[tokio::test]
    async fn test_reorder_moves_down_and_renumbers() {
        let mock = MockScanClient::new()
            .with_scans(vec![
                ScanBuilder::new(1).order(0).build(),
                ScanBuilder::new(2).order(1).build(),
                ScanBuilder::new(3).order(2).build(),
            ])
            .await;

        mock.set_display_order(1, 2).await.unwrap();

        let ids: Vec<_> = mock.list_scans().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_reorder_moves_up() {
        let mock = MockScanClient::new()
            .with_scans(vec![
                ScanBuilder::new(1).order(0).build(),
                ScanBuilder::new(2).order(1).build(),
                ScanBuilder::new(3).order(2).build(),
            ])
            .await;

        mock.set_display_order(3, 0).await.unwrap();

        let scans = mock.list_scans().await.unwrap();
        let ids: Vec<_> = scans.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(scans[0].display_order, 0);
    }

    #[tokio::test]
    async fn test_reorder_unknown_id_is_not_found() {
        let mock = MockScanClient::new().with_scans(two_scans()).await;
        assert!(mock.set_display_order(42, 0).await.is_err());
    }
}
