//! Scan collection store
//!
//! Owns the cached scan list for one browsing session and defines how it is
//! reconciled with the scan service:
//!
//! - `refresh` replaces the list wholesale; on failure the previous snapshot
//!   stays visible and the failure is recorded in `last_error`.
//! - `create` appends the created scan locally without re-fetching.
//! - `reorder` sends only the target position, then always re-fetches, so
//!   the visible order is whatever the service reports afterwards.

use std::sync::Arc;

use log::{debug, warn};

use crate::client::{Domain, Scan, ScanApi, ScanId, ScanRequest};
use crate::error::Result;

/// In-memory scan collection backed by a [`ScanApi`] client.
///
/// Not a global: each session creates its own store and passes it to the
/// code that renders or mutates it.
pub struct ScanStore<C: ScanApi> {
    client: Arc<C>,
    entities: Vec<Scan>,
    is_loading: bool,
    last_error: Option<String>,
}

impl<C: ScanApi> ScanStore<C> {
    /// Create an empty store without fetching.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            entities: Vec::new(),
            is_loading: false,
            last_error: None,
        }
    }

    /// Create a store and eagerly fetch the collection.
    ///
    /// A failed initial fetch is recorded in [`last_error`](Self::last_error)
    /// and leaves the store empty.
    pub async fn mount(client: Arc<C>) -> Self {
        let mut store = Self::new(client);
        if let Err(err) = store.refresh().await {
            debug!("Initial fetch failed: {}", err);
        }
        store
    }

    /// Scans ordered by display order, as of the last successful fetch
    /// plus any scans created since.
    pub fn entities(&self) -> &[Scan] {
        &self.entities
    }

    /// Whether a fetch or create is in flight.
    ///
    /// A request that never completes leaves this `true`.
    #[allow(dead_code)]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message describing the most recent failure, if not yet cleared
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[allow(dead_code)]
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Look up a cached scan by id
    pub fn find(&self, id: ScanId) -> Option<&Scan> {
        self.entities.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Re-fetch the whole collection from the service.
    ///
    /// On success the cached list is replaced (no merging, filtering or
    /// dedup) and `last_error` is cleared. On failure the cached list is left
    /// exactly as it was and `last_error` describes the failure.
    pub async fn refresh(&mut self) -> Result<()> {
        self.is_loading = true;
        let result = self.client.list_scans().await;
        self.is_loading = false;

        match result {
            Ok(mut scans) => {
                scans.sort_by_key(|s| s.display_order);
                debug!("Fetched {} scans", scans.len());
                self.entities = scans;
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!("Failed to fetch scans: {}", err);
                self.last_error = Some(format!("Failed to fetch scans: {}", err));
                Err(err)
            }
        }
    }

    /// Start a new scan and append it to the cached list.
    ///
    /// The created scan is not re-fetched. On failure the cached list is
    /// unchanged and the error is returned to the caller.
    pub async fn create(&mut self, request: ScanRequest) -> Result<Scan> {
        self.is_loading = true;
        let result = self.client.create_scan(&request).await;
        self.is_loading = false;

        match result {
            Ok(scan) => {
                debug!("Created scan {} for {}", scan.id, scan.domain);
                self.entities.push(scan.clone());
                Ok(scan)
            }
            Err(err) => {
                warn!("Failed to create scan for {}: {}", request.domain, err);
                self.last_error = Some(format!("Failed to create scan: {}", err));
                Err(err)
            }
        }
    }

    /// Validate raw form input, then [`create`](Self::create).
    ///
    /// An invalid domain is rejected before any request is made and does not
    /// touch `last_error`.
    pub async fn submit(
        &mut self,
        domain: &str,
        timeout: Option<u32>,
        passive: Option<bool>,
    ) -> Result<Scan> {
        let domain = Domain::parse(domain)?;
        let mut request = ScanRequest::new(domain);
        if let Some(minutes) = timeout {
            request = request.timeout(minutes);
        }
        if let Some(passive) = passive {
            request = request.passive(passive);
        }
        self.create(request).await
    }

    /// Ask the service to move scan `id` to `new_order`, then re-fetch.
    ///
    /// The re-fetch happens whether or not the order update succeeded, and
    /// only after it completed. An order-update failure is returned and kept
    /// in `last_error` even when the re-fetch succeeds; a failure of the
    /// re-fetch alone is only recorded in `last_error`.
    pub async fn reorder(&mut self, id: ScanId, new_order: i64) -> Result<()> {
        let outcome = self.client.set_display_order(id, new_order).await;
        if let Err(ref err) = outcome {
            warn!("Failed to move scan {} to {}: {}", id, new_order, err);
        }

        if let Err(err) = self.refresh().await {
            debug!("Refresh after reorder failed: {}", err);
        }

        match outcome {
            Ok(()) => Ok(()),
            Err(err) => {
                self.last_error = Some(format!("Failed to update order: {}", err));
                Err(err)
            }
        }
    }

    /// Fetch one scan's details without touching the cached list.
    pub async fn get(&self, id: ScanId) -> Result<Scan> {
        self.client.get_scan(id).await
    }
}
