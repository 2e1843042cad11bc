//! Core application layer
//!
//! The host page owning canonical state, and the typed event channel widgets use
//! to talk to it. NO imports from frontend/ or rendering code.

pub mod page;
pub mod ui_event;

pub use page::RosterPage;
pub use ui_event::{EventReceiver, EventSender, UiEvent};
