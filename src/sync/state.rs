//! The single current selection.

use crate::model::ContentId;
use serde::{Deserialize, Serialize};

/// Which region, if any, is focused.
///
/// Either both the id and the page are set or neither is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    focused: Option<(ContentId, u32)>,
}

impl SelectionState {
    /// Create an unfocused state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a region is focused.
    pub fn is_focused(&self) -> bool {
        self.focused.is_some()
    }

    /// Id of the focused region.
    pub fn focused_id(&self) -> Option<&ContentId> {
        self.focused.as_ref().map(|(id, _)| id)
    }

    /// Page of the focused region.
    pub fn focused_page(&self) -> Option<u32> {
        self.focused.as_ref().map(|(_, page)| *page)
    }

    /// Check if the given region is the focused one.
    pub fn is(&self, content_id: &ContentId, page: u32) -> bool {
        matches!(&self.focused, Some((id, p)) if id == content_id && *p == page)
    }

    pub(crate) fn focus(&mut self, content_id: ContentId, page: u32) {
        self.focused = Some((content_id, page));
    }
}
