//! Selection state machine shared by the overlay and the content list.

use super::observer::{ActivationSource, NoopObserver, SelectionNotification, SelectionObserver};
use super::state::SelectionState;
use crate::codec::{CellIdentifierCodec, CompoundCellId};
use crate::error::{Error, Result};
use crate::index::RegionIndex;
use crate::model::{ContentId, Region};
use std::sync::Arc;

/// Owns the current selection of one document and tells both views about it.
///
/// Every activation, repeated or not, notifies the overlay observer and then
/// the list observer. Activations of a page or region the index does not
/// hold, and overlay clicks on inactive regions, are rejected without
/// touching the state.
pub struct SelectionSynchronizer {
    index: Arc<RegionIndex>,
    codec: CellIdentifierCodec,
    state: SelectionState,
    overlay: Box<dyn SelectionObserver>,
    list: Box<dyn SelectionObserver>,
}

impl SelectionSynchronizer {
    /// Create an unfocused synchronizer with no-op observers.
    pub fn new(index: Arc<RegionIndex>) -> Self {
        Self {
            index,
            codec: CellIdentifierCodec::new(),
            state: SelectionState::new(),
            overlay: Box::new(NoopObserver),
            list: Box::new(NoopObserver),
        }
    }

    /// Set the overlay observer and return self.
    pub fn with_overlay_observer<O: SelectionObserver + 'static>(mut self, observer: O) -> Self {
        self.overlay = Box::new(observer);
        self
    }

    /// Set the list observer and return self.
    pub fn with_list_observer<O: SelectionObserver + 'static>(mut self, observer: O) -> Self {
        self.list = Box::new(observer);
        self
    }

    pub(crate) fn with_observers(
        mut self,
        overlay: Box<dyn SelectionObserver>,
        list: Box<dyn SelectionObserver>,
    ) -> Self {
        self.overlay = overlay;
        self.list = list;
        self
    }

    /// The index selections are validated against.
    pub fn index(&self) -> &RegionIndex {
        &self.index
    }

    /// Shared handle to the index.
    pub fn index_handle(&self) -> Arc<RegionIndex> {
        Arc::clone(&self.index)
    }

    /// Current selection.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Activate a region clicked on the page overlay.
    ///
    /// A `cell_token` that decodes to a cell of this region's table is
    /// carried in the notification; any other token is treated as a plain
    /// region click.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageNotFound`] if the index has no such page,
    /// [`Error::RegionNotFound`] if the region is not on that page and
    /// [`Error::RegionInactive`] if the region is not clickable.
    pub fn activate_from_overlay(
        &mut self,
        content_id: &ContentId,
        page: u32,
        cell_token: Option<&str>,
    ) -> Result<SelectionNotification> {
        let region = self.find_region(content_id, page)?;
        if !region.clickable {
            return Err(Error::RegionInactive {
                content_id: content_id.canonical(),
                page,
            });
        }
        let cell = cell_token.and_then(|token| Self::decode_cell(&self.codec, region, token));
        self.activate(content_id, page, cell, ActivationSource::Overlay)
    }

    /// Activate a region picked in the content list.
    ///
    /// Inactive regions can still be picked here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageNotFound`] if the index has no such page and
    /// [`Error::RegionNotFound`] if the region is not on that page.
    pub fn activate_from_list(
        &mut self,
        content_id: &ContentId,
        page: u32,
    ) -> Result<SelectionNotification> {
        self.find_region(content_id, page)?;
        self.activate(content_id, page, None, ActivationSource::List)
    }

    /// Give back the observers, overlay first.
    pub fn into_observers(self) -> (Box<dyn SelectionObserver>, Box<dyn SelectionObserver>) {
        (self.overlay, self.list)
    }

    fn find_region(&self, content_id: &ContentId, page: u32) -> Result<&Region> {
        self.index
            .page(page)
            .ok_or(Error::PageNotFound(page))?
            .region(content_id)
            .ok_or_else(|| Error::RegionNotFound {
                content_id: content_id.canonical(),
                page,
            })
    }

    fn decode_cell(
        codec: &CellIdentifierCodec,
        region: &Region,
        token: &str,
    ) -> Option<CompoundCellId> {
        let Some(cell) = codec.decode(token) else {
            log::debug!("Cell token {:?} does not decode, activating the region", token);
            return None;
        };
        if !region.content_id.matches(&cell.table_id) {
            log::debug!(
                "Cell token names table {} but region {} was clicked",
                cell.table_id,
                region.content_id
            );
            return None;
        }
        if region.table.as_ref().and_then(|t| cell.locate(t)).is_none() {
            log::debug!(
                "Cell token {:?} names no cell of table {}, activating the region",
                token,
                region.content_id
            );
            return None;
        }
        Some(cell)
    }

    fn activate(
        &mut self,
        content_id: &ContentId,
        page: u32,
        cell: Option<CompoundCellId>,
        source: ActivationSource,
    ) -> Result<SelectionNotification> {
        self.state.focus(content_id.clone(), page);
        let notification = SelectionNotification {
            content_id: content_id.clone(),
            page,
            cell,
            source,
        };
        log::debug!(
            "Selected region {} on page {} from {:?}",
            content_id,
            page,
            source
        );

        self.overlay.on_selection(&notification);
        self.list.on_selection(&notification);
        Ok(notification)
    }
}

impl Default for SelectionSynchronizer {
    fn default() -> Self {
        Self::new(Arc::new(RegionIndex::default()))
    }
}

impl std::fmt::Debug for SelectionSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSynchronizer")
            .field("pages", &self.index.page_count())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, Quad, Region, RegionType, TableCell, TableCells};
    use crate::sync::observer::{ChannelObserver, SelectionEvent};

    fn index() -> Arc<RegionIndex> {
        let quad = Quad::from_rect(0.0, 0.0, 10.0, 10.0).unwrap();
        let mut page = Page::new(1);
        page.add_region(Region::new(7, 1, RegionType::Paragraph, quad));
        page.add_region(
            Region::new("T1", 1, RegionType::Table, quad)
                .with_table(TableCells::new(vec![TableCell::new(quad, 0, 0)])),
        );
        page.add_region(Region::new(9, 1, RegionType::Image, quad).clickable(false));
        Arc::new(RegionIndex::from_pages(vec![page]))
    }

    #[test]
    fn test_activate_notifies_both_views() {
        let (overlay, overlay_rx) = ChannelObserver::unbounded();
        let (list, list_rx) = ChannelObserver::unbounded();
        let mut sync = SelectionSynchronizer::new(index())
            .with_overlay_observer(overlay)
            .with_list_observer(list);

        let n = sync.activate_from_list(&ContentId::from(7), 1).unwrap();
        assert_eq!(overlay_rx.try_recv().unwrap(), SelectionEvent::Selected(n.clone()));
        assert_eq!(list_rx.try_recv().unwrap(), SelectionEvent::Selected(n));
        assert!(sync.state().is(&ContentId::from(7), 1));
    }

    #[test]
    fn test_repeat_activation_still_notifies() {
        let (list, list_rx) = ChannelObserver::unbounded();
        let mut sync = SelectionSynchronizer::new(index()).with_list_observer(list);
        sync.activate_from_list(&ContentId::from(7), 1).unwrap();
        sync.activate_from_list(&ContentId::from(7), 1).unwrap();
        assert_eq!(list_rx.len(), 2);
    }

    #[test]
    fn test_unknown_targets_rejected() {
        let (list, list_rx) = ChannelObserver::unbounded();
        let mut sync = SelectionSynchronizer::new(index()).with_list_observer(list);

        let err = sync.activate_from_list(&ContentId::from(7), 2).unwrap_err();
        assert!(matches!(err, Error::PageNotFound(2)));

        let err = sync.activate_from_overlay(&ContentId::from(8), 1, None).unwrap_err();
        assert!(matches!(err, Error::RegionNotFound { ref content_id, page: 1 } if content_id == "8"));

        assert!(!sync.state().is_focused());
        assert!(list_rx.is_empty());
    }

    #[test]
    fn test_overlay_cell_token() {
        let mut sync = SelectionSynchronizer::new(index());
        let table = ContentId::from("T1");

        let n = sync
            .activate_from_overlay(&table, 1, Some("T1_cell_0_0_cell_0_1_cell_0_1"))
            .unwrap();
        let cell = n.cell.unwrap();
        assert_eq!((cell.row, cell.row_span, cell.col, cell.col_span), (0, 1, 0, 1));

        let n = sync.activate_from_overlay(&table, 1, Some("garbage")).unwrap();
        assert!(n.cell.is_none());

        let n = sync
            .activate_from_overlay(&table, 1, Some("T2_cell_0_0_cell_0_1_cell_0_1"))
            .unwrap();
        assert!(n.cell.is_none());

        let n = sync
            .activate_from_overlay(&table, 1, Some("T1_cell_4_4_cell_4_1_cell_4_1"))
            .unwrap();
        assert!(n.cell.is_none());
    }

    #[test]
    fn test_inactive_region_ignores_overlay() {
        let (overlay, overlay_rx) = ChannelObserver::unbounded();
        let (list, list_rx) = ChannelObserver::unbounded();
        let mut sync = SelectionSynchronizer::new(index())
            .with_overlay_observer(overlay)
            .with_list_observer(list);
        let figure = ContentId::from(9);

        let err = sync.activate_from_overlay(&figure, 1, None).unwrap_err();
        assert!(matches!(err, Error::RegionInactive { ref content_id, page: 1 } if content_id == "9"));
        assert!(!sync.state().is_focused());
        assert!(overlay_rx.is_empty());
        assert!(list_rx.is_empty());

        sync.activate_from_list(&figure, 1).unwrap();
        assert!(sync.state().is(&figure, 1));
        assert_eq!(list_rx.len(), 1);
    }

    #[test]
    fn test_default_is_empty() {
        let mut sync = SelectionSynchronizer::default();
        assert!(sync.index().is_empty());
        assert!(sync.activate_from_list(&ContentId::from(0), 1).is_err());
    }
}
