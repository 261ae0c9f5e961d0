//! Consumers of selection changes.
//!
//! Both views of a document (the page overlay and the content list) receive
//! every notification, including the view the activation came from.
//!
//! # Example
//!
//! ```
//! use regionlink::sync::{SelectionNotification, SelectionObserver};
//!
//! struct ScrollIntoView {
//!     last_page: Option<u32>,
//! }
//!
//! impl SelectionObserver for ScrollIntoView {
//!     fn on_selection(&mut self, notification: &SelectionNotification) {
//!         self.last_page = Some(notification.page);
//!     }
//! }
//! ```

use crate::codec::CompoundCellId;
use crate::model::ContentId;
use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};

/// View an activation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationSource {
    /// Click on a region outline drawn over the page
    Overlay,
    /// Click on an entry of the content list
    List,
}

/// Emitted on every activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionNotification {
    /// Focused region
    pub content_id: ContentId,

    /// Page of the focused region
    pub page: u32,

    /// Table cell, when the overlay click landed on one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<CompoundCellId>,

    /// Where the activation came from
    pub source: ActivationSource,
}

/// Trait for reacting to selection changes.
///
/// All methods do nothing by default.
pub trait SelectionObserver: Send {
    /// Called after the selection changed or was re-confirmed.
    fn on_selection(&mut self, notification: &SelectionNotification) {
        let _ = notification;
    }

    /// Called when the document is replaced and the selection discarded.
    fn on_reset(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Default)]
pub struct NoopObserver;

impl SelectionObserver for NoopObserver {}

/// Observer backed by a closure.
pub struct FnObserver<F>(F);

impl<F> FnObserver<F>
where
    F: FnMut(&SelectionNotification) + Send,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> SelectionObserver for FnObserver<F>
where
    F: FnMut(&SelectionNotification) + Send,
{
    fn on_selection(&mut self, notification: &SelectionNotification) {
        (self.0)(notification)
    }
}

/// Event forwarded by [`ChannelObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// A region was activated
    Selected(SelectionNotification),
    /// The document was replaced
    Reset,
}

/// Observer that forwards events over a channel.
///
/// Sending never blocks the synchronizer on an unbounded channel; events to
/// a disconnected receiver are dropped.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<SelectionEvent>,
}

impl ChannelObserver {
    /// Create an observer sending into `sender`.
    pub fn new(sender: Sender<SelectionEvent>) -> Self {
        Self { sender }
    }

    /// Create an observer with a fresh unbounded channel.
    pub fn unbounded() -> (Self, Receiver<SelectionEvent>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self::new(sender), receiver)
    }

    fn send(&self, event: SelectionEvent) {
        if self.sender.send(event).is_err() {
            log::debug!("Selection receiver disconnected, dropping event");
        }
    }
}

impl SelectionObserver for ChannelObserver {
    fn on_selection(&mut self, notification: &SelectionNotification) {
        self.send(SelectionEvent::Selected(notification.clone()));
    }

    fn on_reset(&mut self) {
        self.send(SelectionEvent::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> SelectionNotification {
        SelectionNotification {
            content_id: ContentId::from(1),
            page: 1,
            cell: None,
            source: ActivationSource::List,
        }
    }

    #[test]
    fn test_channel_observer_forwards() {
        let (mut observer, receiver) = ChannelObserver::unbounded();
        observer.on_selection(&notification());
        observer.on_reset();

        assert_eq!(receiver.try_recv().unwrap(), SelectionEvent::Selected(notification()));
        assert_eq!(receiver.try_recv().unwrap(), SelectionEvent::Reset);
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_channel_observer_disconnected() {
        let (mut observer, receiver) = ChannelObserver::unbounded();
        drop(receiver);
        observer.on_selection(&notification());
    }

    #[test]
    fn test_fn_observer() {
        let mut pages = Vec::new();
        {
            let mut observer = FnObserver::new(|n: &SelectionNotification| pages.push(n.page));
            observer.on_selection(&notification());
            observer.on_reset();
        }
        assert_eq!(pages, vec![1]);
    }

    #[test]
    fn test_notification_json() {
        let json = serde_json::to_string(&notification()).unwrap();
        assert_eq!(json, r#"{"content_id":1,"page":1,"source":"list"}"#);
    }
}
