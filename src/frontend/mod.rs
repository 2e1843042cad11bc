//! Frontend abstraction layer
//!
//! The `Frontend` trait separates terminal handling and drawing from the headless
//! widget state in `widgets/` and the page in `core/`.

pub mod events;
pub mod tui;

use crate::core::RosterPage;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

pub trait Frontend {
    /// Return all pending input converted to `FrontendEvent`s (empty if none)
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Route one input event to the page's widgets
    fn handle_event(&mut self, event: FrontendEvent, page: &mut RosterPage) -> Result<()>;

    /// Draw one frame.
    ///
    /// Takes the page mutably because some widgets re-sync their local editing state
    /// (text areas) against the page while drawing.
    fn render(&mut self, page: &mut RosterPage) -> Result<()>;

    /// Restore the terminal before exit
    fn cleanup(&mut self) -> Result<()>;
}
