//! user-roster: a terminal user list with a detail dialog, a popup/inline display
//! toggle and a validated insert form.
//!
//! Widget state in `widgets/` and `validation/` is rendering-agnostic; the ratatui
//! frontend in `frontend/` draws it and feeds it input.

pub mod config;
pub mod core;
pub mod data;
pub mod frontend;
pub mod services;
pub mod validation;
pub mod widgets;
