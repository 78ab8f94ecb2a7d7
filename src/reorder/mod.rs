//! Drag-and-drop reorder controller
//!
//! Turns a drag gesture (source scan dropped onto a target scan) into at most
//! one reorder request against the [`ScanStore`]. The source asks for the
//! target's current display order; the scan service decides how the other
//! scans shift.

use log::debug;

use crate::client::{Scan, ScanApi, ScanId};
use crate::error::Result;
use crate::store::ScanStore;

/// Drag interaction state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// A drag is in progress; holds the scan being dragged
    Dragging(Scan),
}

/// A single request to move one scan to another scan's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderIntent {
    pub scan_id: ScanId,
    pub new_order: i64,
}

impl ReorderIntent {
    fn between(source: &Scan, target: &Scan) -> Option<Self> {
        if source.id == target.id {
            return None;
        }
        Some(Self {
            scan_id: source.id,
            new_order: target.display_order,
        })
    }
}

/// Two-state drag controller (`Idle` / `Dragging`).
///
/// Only one drag can be active; starting a new drag replaces the pending
/// source. Dropping or cancelling always returns to `Idle`.
#[derive(Debug, Default)]
pub struct ReorderController {
    state: DragState,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The scan currently being dragged, if any
    pub fn source(&self) -> Option<&Scan> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(scan) => Some(scan),
        }
    }

    /// Begin dragging `scan`, replacing any pending source.
    pub fn drag_start(&mut self, scan: &Scan) {
        if let DragState::Dragging(previous) = &self.state {
            debug!("Drag of scan {} replaced by scan {}", previous.id, scan.id);
        }
        self.state = DragState::Dragging(scan.clone());
    }

    /// Hovering over `target`. Never changes state; returns what a drop
    /// here would request.
    pub fn drag_over(&self, target: &Scan) -> Option<ReorderIntent> {
        self.source().and_then(|source| ReorderIntent::between(source, target))
    }

    /// Drop on `target` and return to `Idle`.
    ///
    /// Yields no intent when idle or when dropping a scan onto itself.
    pub fn drop_on(&mut self, target: &Scan) -> Option<ReorderIntent> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging(source) => ReorderIntent::between(&source, target),
        }
    }

    /// Drop on `target` and forward the resulting intent to the store.
    ///
    /// The controller is back to `Idle` before the store is called, whatever
    /// the outcome. Returns the intent that was sent, if any.
    pub async fn drop_onto<C: ScanApi>(
        &mut self,
        target: &Scan,
        store: &mut ScanStore<C>,
    ) -> Result<Option<ReorderIntent>> {
        let Some(intent) = self.drop_on(target) else {
            debug!("Drop on scan {} ignored", target.id);
            return Ok(None);
        };

        debug!(
            "Moving scan {} to display order {}",
            intent.scan_id, intent.new_order
        );
        store.reorder(intent.scan_id, intent.new_order).await?;
        Ok(Some(intent))
    }

    /// Abandon the current drag, if any.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
