//! Document lifecycle with latest-request-wins loading.

use super::observer::SelectionObserver;
use super::synchronizer::SelectionSynchronizer;
use crate::error::Result;
use crate::index::{IndexOptions, RegionIndex};
use serde_json::Value;
use std::sync::Arc;

/// Receipt for a requested document load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Sequence number of the request.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What [`DocumentSession::complete_load`] did with a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The payload was indexed and installed
    Accepted,
    /// A newer load was requested; the payload was ignored
    Stale,
}

impl LoadOutcome {
    /// Check if the payload was installed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, LoadOutcome::Accepted)
    }
}

/// The currently displayed document and its selection.
///
/// Payloads arrive asynchronously from the caller's point of view, so a
/// slow response for an old document may arrive after a newer request.
/// Only the payload answering the latest [`begin_load`](Self::begin_load)
/// is installed. Observers stay attached across documents.
///
/// # Example
///
/// ```
/// use regionlink::sync::{DocumentSession, LoadOutcome};
/// use serde_json::json;
///
/// let mut session = DocumentSession::new();
/// let old = session.begin_load();
/// let new = session.begin_load();
///
/// let payload = json!({"pages": [{"content": [{"pos": [0, 0, 1, 0, 1, 1, 0, 1]}]}]});
/// assert_eq!(session.complete_load(old, &payload), LoadOutcome::Stale);
/// assert_eq!(session.complete_load(new, &payload), LoadOutcome::Accepted);
/// assert_eq!(session.index().region_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DocumentSession {
    options: IndexOptions,
    latest: u64,
    installed: u64,
    synchronizer: SelectionSynchronizer,
}

impl DocumentSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with index options.
    pub fn with_options(options: IndexOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Set the overlay observer and return self.
    pub fn with_overlay_observer<O: SelectionObserver + 'static>(mut self, observer: O) -> Self {
        self.synchronizer = std::mem::take(&mut self.synchronizer).with_overlay_observer(observer);
        self
    }

    /// Set the list observer and return self.
    pub fn with_list_observer<O: SelectionObserver + 'static>(mut self, observer: O) -> Self {
        self.synchronizer = std::mem::take(&mut self.synchronizer).with_list_observer(observer);
        self
    }

    /// Request a new document.
    ///
    /// The current index and selection are discarded right away and both
    /// observers are told so.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest += 1;
        log::debug!("Document load {} requested", self.latest);
        self.replace_index(RegionIndex::default(), true);
        LoadTicket(self.latest)
    }

    /// Install the payload answering `ticket`, unless a newer load exists.
    pub fn complete_load(&mut self, ticket: LoadTicket, payload: &Value) -> LoadOutcome {
        if !self.is_current(ticket) {
            log::debug!(
                "Ignoring stale load {} (latest is {})",
                ticket.0,
                self.latest
            );
            return LoadOutcome::Stale;
        }

        let index = RegionIndex::build_with_options(payload, &self.options);
        self.replace_index(index, false);
        self.installed = ticket.0;
        LoadOutcome::Accepted
    }

    /// [`complete_load`](Self::complete_load) from payload text.
    ///
    /// Stale payloads are not parsed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if a current payload is not valid JSON.
    /// The pending load stays pending.
    pub fn complete_load_str(&mut self, ticket: LoadTicket, payload: &str) -> Result<LoadOutcome> {
        if !self.is_current(ticket) {
            return Ok(LoadOutcome::Stale);
        }
        let value: Value = serde_json::from_str(payload)?;
        Ok(self.complete_load(ticket, &value))
    }

    /// Check if the latest requested load has not completed yet.
    pub fn is_loading(&self) -> bool {
        self.installed < self.latest
    }

    /// Index of the current document. Empty while a load is pending.
    pub fn index(&self) -> &RegionIndex {
        self.synchronizer.index()
    }

    /// Selection of the current document.
    pub fn synchronizer(&self) -> &SelectionSynchronizer {
        &self.synchronizer
    }

    /// Selection of the current document, for activations.
    pub fn synchronizer_mut(&mut self) -> &mut SelectionSynchronizer {
        &mut self.synchronizer
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest && self.installed < ticket.0
    }

    fn replace_index(&mut self, index: RegionIndex, reset: bool) {
        let (mut overlay, mut list) = std::mem::take(&mut self.synchronizer).into_observers();
        if reset {
            overlay.on_reset();
            list.on_reset();
        }
        self.synchronizer =
            SelectionSynchronizer::new(Arc::new(index)).with_observers(overlay, list);
    }
}
