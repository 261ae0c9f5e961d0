//! Selection synchronization between the page overlay and the content list.
//!
//! A [`SelectionSynchronizer`] owns the one current selection of a document
//! and pushes every change to two observers. A [`DocumentSession`] swaps
//! documents in and out, discarding responses to superseded loads.

mod observer;
mod session;
mod state;
mod synchronizer;

pub use observer::{
    ActivationSource, ChannelObserver, FnObserver, NoopObserver, SelectionEvent,
    SelectionNotification, SelectionObserver,
};
pub use session::{DocumentSession, LoadOutcome, LoadTicket};
pub use state::SelectionState;
pub use synchronizer::SelectionSynchronizer;
