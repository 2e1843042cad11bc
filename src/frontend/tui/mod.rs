//! TUI frontend (ratatui)
//!
//! Renders the headless widget states and translates crossterm input into calls
//! on them.

pub mod app;
pub mod display_toggle;
pub mod insert_form;
pub mod popup_dialog;
pub mod theme;
pub mod user_list;
pub mod view;
pub mod widget_traits;

pub use app::TuiFrontend;
pub use theme::RosterTheme;
pub use view::RosterView;
