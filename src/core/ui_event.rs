//! Typed events flowing from widgets up to their owner.
//!
//! Widgets never mutate parent state. They push a `UiEvent` on the shared channel
//! and the host page applies it, then re-supplies inputs on the next frame.

use crate::data::{DisplayMode, InsertResult, User};
use crate::services::SubmitError;
use crate::validation::ValidationResult;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Display toggle flipped
    ModeChanged(DisplayMode),

    /// Insert form finished a submit attempt (success or failure)
    Inserted(InsertResult),

    /// Insert form validity or visible errors changed
    ValidationChanged(ValidationResult),

    /// Insert form asks to be hidden
    FormClosed,

    /// List row "view details" picked
    DetailsRequested(User),

    /// Detail dialog asks to be hidden
    DialogClosed,

    /// Background submit call resolved
    SubmissionFinished {
        generation: u64,
        outcome: Result<(), SubmitError>,
    },

    /// Success banner dwell time is over
    DwellElapsed { generation: u64 },
}

pub type EventSender = mpsc::UnboundedSender<UiEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<UiEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Send, tolerating an owner that has gone away
pub(crate) fn emit(events: &EventSender, event: UiEvent) {
    if let Err(e) = events.send(event) {
        tracing::trace!("Dropping UI event, owner gone: {:?}", e.0);
    }
}

/// Drain everything currently queued (test and headless helper)
pub fn drain(rx: &mut EventReceiver) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
