//! Widget state structs (rendering-agnostic)
//!
//! This module contains state-only structures for every widget of the roster.
//! These structs hold data, apply input and push `UiEvent`s to their owner,
//! but contain no rendering logic. The TUI frontend renders them with ratatui.

pub mod display_toggle;
pub mod insert_form;
pub mod popup_dialog;
pub mod user_list;

pub use display_toggle::DisplayToggleState;
pub use insert_form::{InsertFormState, SubmitOutcome, SubmitPhase, SubmitTiming};
pub use popup_dialog::{ClickTarget, PopupDialogState};
pub use user_list::UserListState;
