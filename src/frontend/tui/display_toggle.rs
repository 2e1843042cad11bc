//! Button that flips between popup and inline form display.

use super::theme::RosterTheme;
use crate::widgets::DisplayToggleState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Caption with brackets and the hotkey hint
pub fn button_caption(state: &DisplayToggleState) -> String {
    format!("[ {} (m) ]", state.button_text())
}

/// Width needed to draw the button
pub fn button_width(state: &DisplayToggleState) -> u16 {
    button_caption(state).chars().count() as u16
}

pub fn render(state: &DisplayToggleState, area: Rect, buf: &mut Buffer, theme: &RosterTheme) {
    let style = if state.is_disabled() {
        Style::default().fg(theme.muted).add_modifier(Modifier::DIM)
    } else {
        Style::default()
            .fg(theme.label_focused)
            .add_modifier(Modifier::BOLD)
    };
    Paragraph::new(Line::from(Span::styled(button_caption(state), style))).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ui_event::channel;
    use crate::data::DisplayMode;

    #[test]
    fn test_caption_follows_mode() {
        let (tx, _rx) = channel();
        let mut state = DisplayToggleState::new(DisplayMode::Popup, tx);
        assert_eq!(button_caption(&state), "[ Show Inline (m) ]");
        state.set_mode(DisplayMode::Inline);
        assert_eq!(button_caption(&state), "[ Show Popup (m) ]");
        assert_eq!(button_width(&state), 18);
    }

    #[test]
    fn test_disabled_button_is_dimmed() {
        let (tx, _rx) = channel();
        let mut state = DisplayToggleState::new(DisplayMode::Popup, tx);
        state.set_disabled(true);

        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        render(&state, area, &mut buf, &RosterTheme::default());
        assert!(buf[(2, 0)].modifier.contains(Modifier::DIM));
    }
}
