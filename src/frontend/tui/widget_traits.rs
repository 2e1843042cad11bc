//! Behavior traits shared by the TUI widgets
//!
//! The view drives lists and forms through these instead of matching on each
//! widget's own method names.

use tui_textarea::{CursorMove, TextArea};

/// Widgets with a highlighted row
pub trait Navigable {
    fn navigate_up(&mut self);

    fn navigate_down(&mut self);

    /// Move up one page (~10 rows)
    fn page_up(&mut self);

    /// Move down one page (~10 rows)
    fn page_down(&mut self);

    fn home(&mut self) {}

    fn end(&mut self) {}
}

/// Forms with Tab/Shift+Tab focus order
pub trait FieldNavigable {
    fn next_field(&mut self);

    fn previous_field(&mut self);

    fn field_count(&self) -> usize;

    fn current_field(&self) -> usize;
}

/// Forms whose fields are text areas
pub trait TextEditable {
    fn get_focused_field_mut(&mut self) -> Option<&mut TextArea<'static>>;

    /// Select all text in the focused field (Ctrl+A)
    fn select_all(&mut self) {
        if let Some(field) = self.get_focused_field_mut() {
            field.move_cursor(CursorMove::End);
            field.start_selection();
            field.move_cursor(CursorMove::Head);
        }
    }
}
