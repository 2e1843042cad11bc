//! Insert-user form: one text area per field over the headless `InsertFormState`.
//!
//! Every edit is pushed into the state with `set_value`, and leaving a field with
//! Tab/Shift+Tab touches it. When the state changes underneath (reset after the
//! success dwell, cancel) the text areas are rebuilt from the state on the next draw.

use super::popup_dialog::centered;
use super::theme::RosterTheme;
use super::widget_traits::{FieldNavigable, TextEditable};
use crate::validation::FieldName;
use crate::widgets::{InsertFormState, SubmitPhase};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget as RatatuiWidget},
};
use tui_textarea::TextArea;

const POPUP_WIDTH: u16 = 64;
const POPUP_HEIGHT: u16 = 14;
const LABEL_WIDTH: u16 = 13;

/// What the owner should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

pub struct InsertFormWidget {
    inputs: [TextArea<'static>; 4],
    focused_field: usize,
}

impl Default for InsertFormWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl InsertFormWidget {
    pub fn new() -> Self {
        Self {
            inputs: FieldName::ALL.map(|field| Self::make_input(field, "")),
            focused_field: 0,
        }
    }

    fn make_input(field: FieldName, value: &str) -> TextArea<'static> {
        let mut input = TextArea::default();
        input.set_placeholder_text(field.placeholder());
        if !value.is_empty() {
            input.insert_str(value);
        }
        input
    }

    pub fn focused(&self) -> FieldName {
        FieldName::ALL[self.focused_field]
    }

    pub fn text(&self, field: FieldName) -> String {
        self.inputs[field.index()].lines().join("")
    }

    /// Rebuild any text area that no longer matches the state's value
    pub fn sync_from(&mut self, form: &InsertFormState) {
        for field in FieldName::ALL {
            let value = form.value(field);
            if self.text(field) != value {
                self.inputs[field.index()] = Self::make_input(field, value);
            }
        }
    }

    fn push_focused(&self, form: &mut InsertFormState) {
        let field = self.focused();
        form.set_value(field, &self.text(field));
    }

    pub fn handle_key(&mut self, key: KeyEvent, form: &mut InsertFormState) -> FormAction {
        if key.code == KeyCode::Esc {
            return FormAction::Cancel;
        }

        // Controls stay disabled while a submission is in flight or its banner is up
        if form.phase() != SubmitPhase::Idle {
            return FormAction::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => FormAction::Submit,
            KeyCode::Char('s') if ctrl => FormAction::Submit,
            KeyCode::Tab => {
                form.touch(self.focused());
                self.next_field();
                FormAction::None
            }
            KeyCode::BackTab => {
                form.touch(self.focused());
                self.previous_field();
                FormAction::None
            }
            KeyCode::Char('a') if ctrl => {
                self.select_all();
                FormAction::None
            }
            // Would split the single-line input
            KeyCode::Char('m') if ctrl => FormAction::None,
            _ => {
                if let Some(input) = self.get_focused_field_mut() {
                    input.input(key);
                }
                self.push_focused(form);
                FormAction::None
            }
        }
    }

    /// Bracketed paste into the focused field
    pub fn paste(&mut self, text: &str, form: &mut InsertFormState) {
        if form.phase() != SubmitPhase::Idle {
            return;
        }
        let flat = text.replace(['\r', '\n'], " ");
        if let Some(input) = self.get_focused_field_mut() {
            input.insert_str(flat);
        }
        self.push_focused(form);
    }

    /// Area the form occupies: centered for popup mode, all of `area` inline
    pub fn layout(form: &InsertFormState, area: Rect) -> Rect {
        if form.display_mode().is_popup() {
            centered(area, POPUP_WIDTH, POPUP_HEIGHT)
        } else {
            area
        }
    }

    pub fn render(
        &mut self,
        form: &InsertFormState,
        area: Rect,
        buf: &mut Buffer,
        theme: &RosterTheme,
    ) {
        if !form.is_visible() {
            return;
        }
        self.sync_from(form);

        let rect = Self::layout(form, area);
        if form.display_mode().is_popup() {
            Clear.render(rect, buf);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.background))
            .title(Span::styled(
                format!(" {} ", form.title()),
                Style::default()
                    .fg(theme.label_focused)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let bottom = inner.y + inner.height;
        let mut y = inner.y;
        for field in FieldName::ALL {
            if y + 1 >= bottom {
                break;
            }
            self.render_field(form, field, inner.x, y, inner.width, buf, theme);
            y += 2;
        }

        y += 1;
        if y < bottom {
            let submit_style = if form.phase() == SubmitPhase::Idle {
                Style::default()
                    .fg(theme.label_focused)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted).add_modifier(Modifier::DIM)
            };
            let buttons = Line::from(vec![
                Span::styled(format!("[ {} ]", form.submit_label()), submit_style),
                Span::raw("  "),
                Span::styled("[ Cancel ]", Style::default().fg(theme.label)),
            ]);
            buf.set_line(inner.x + 1, y, &buttons, inner.width.saturating_sub(1));
            y += 1;
        }

        if y < bottom {
            if let Some(banner) = form.success_message() {
                buf.set_string(
                    inner.x + 1,
                    y,
                    banner,
                    Style::default()
                        .fg(theme.success)
                        .add_modifier(Modifier::BOLD),
                );
            }
            y += 1;
        }

        if y < bottom {
            buf.set_string(
                inner.x + 1,
                y,
                "Tab:Next  Shift+Tab:Prev  Enter/Ctrl+S:Submit  Esc:Cancel",
                Style::default().fg(theme.muted),
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_field(
        &mut self,
        form: &InsertFormState,
        field: FieldName,
        x: u16,
        y: u16,
        width: u16,
        buf: &mut Buffer,
        theme: &RosterTheme,
    ) {
        let is_focused = self.focused() == field;
        let error = form.field(field).visible_error();

        let label_style = if error.is_some() {
            Style::default().fg(theme.error)
        } else if is_focused {
            Style::default().fg(theme.label_focused)
        } else {
            Style::default().fg(theme.label)
        };
        let label_area = Rect {
            x: x + 1,
            y,
            width: LABEL_WIDTH.min(width),
            height: 1,
        };
        Paragraph::new(Line::from(Span::styled(format!("{}:", field.label()), label_style)))
            .render(label_area, buf);

        let input_style = Style::default().fg(theme.text).bg(theme.input_background);
        let input = &mut self.inputs[field.index()];
        input.set_style(input_style);
        input.set_cursor_line_style(Style::default());
        input.set_placeholder_style(Style::default().fg(theme.muted).bg(theme.input_background));
        if is_focused {
            input.set_cursor_style(Style::default().fg(theme.background).bg(theme.text));
        } else {
            input.set_cursor_style(input_style);
        }
        input.set_block(Block::default().borders(Borders::NONE).style(input_style));

        let input_area = Rect {
            x: x + 1 + LABEL_WIDTH,
            y,
            width: width.saturating_sub(LABEL_WIDTH + 2),
            height: 1,
        };
        RatatuiWidget::render(&*input, input_area, buf);

        if let Some(message) = error {
            buf.set_stringn(
                input_area.x,
                y + 1,
                message,
                input_area.width as usize,
                Style::default().fg(theme.error),
            );
        }
    }
}

impl TextEditable for InsertFormWidget {
    fn get_focused_field_mut(&mut self) -> Option<&mut TextArea<'static>> {
        self.inputs.get_mut(self.focused_field)
    }
}

impl FieldNavigable for InsertFormWidget {
    fn next_field(&mut self) {
        self.focused_field = (self.focused_field + 1) % self.field_count();
    }

    fn previous_field(&mut self) {
        self.focused_field = if self.focused_field == 0 {
            self.field_count() - 1
        } else {
            self.focused_field - 1
        };
    }

    fn field_count(&self) -> usize {
        self.inputs.len()
    }

    fn current_field(&self) -> usize {
        self.focused_field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ui_event::{channel, drain, EventReceiver, UiEvent};
    use crate::data::DisplayMode;
    use crate::validation::RuleSet;

    fn form() -> (InsertFormState, EventReceiver) {
        let (tx, rx) = channel();
        let mut form = InsertFormState::new(RuleSet::user_defaults().unwrap(), tx);
        form.set_visible(true);
        (form, rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(widget: &mut InsertFormWidget, form: &mut InsertFormState, text: &str) {
        for c in text.chars() {
            widget.handle_key(key(KeyCode::Char(c)), form);
        }
    }

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_typing_updates_state() {
        let (mut form, _rx) = form();
        let mut widget = InsertFormWidget::new();
        type_str(&mut widget, &mut form, "Al");
        assert_eq!(form.value(FieldName::FirstName), "Al");
        assert!(form.field(FieldName::FirstName).is_dirty());

        widget.handle_key(key(KeyCode::Backspace), &mut form);
        assert_eq!(form.value(FieldName::FirstName), "A");
    }

    #[test]
    fn test_tab_touches_the_field_being_left() {
        let (mut form, mut rx) = form();
        let mut widget = InsertFormWidget::new();

        widget.handle_key(key(KeyCode::Tab), &mut form);
        assert_eq!(widget.focused(), FieldName::LastName);
        assert!(form.field(FieldName::FirstName).is_touched());
        assert!(!form.field(FieldName::LastName).is_touched());

        let events = drain(&mut rx);
        assert!(matches!(events.last(), Some(UiEvent::ValidationChanged(r)) if !r.is_valid));

        widget.handle_key(key(KeyCode::BackTab), &mut form);
        widget.handle_key(key(KeyCode::BackTab), &mut form);
        assert_eq!(widget.focused(), FieldName::Phone);
        assert_eq!(widget.current_field(), 3);
    }

    #[test]
    fn test_submit_and_cancel_keys() {
        let (mut form, _rx) = form();
        let mut widget = InsertFormWidget::new();
        assert_eq!(widget.handle_key(key(KeyCode::Enter), &mut form), FormAction::Submit);
        assert_eq!(
            widget.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &mut form),
            FormAction::Submit
        );
        assert_eq!(widget.handle_key(key(KeyCode::Esc), &mut form), FormAction::Cancel);
    }

    #[test]
    fn test_edits_ignored_while_submitting() {
        let (mut form, _rx) = form();
        form.set_value(FieldName::FirstName, "Grace");
        form.set_value(FieldName::LastName, "Hopper");
        form.set_value(FieldName::Email, "grace@navy.mil");
        form.set_value(FieldName::Phone, "+1-555-010-2030");
        form.submit();

        let mut widget = InsertFormWidget::new();
        widget.sync_from(&form);
        widget.handle_key(key(KeyCode::Char('x')), &mut form);
        assert_eq!(form.value(FieldName::FirstName), "Grace");
        assert_eq!(widget.handle_key(key(KeyCode::Enter), &mut form), FormAction::None);
    }

    #[test]
    fn test_reset_state_clears_text_areas() {
        let (mut form, _rx) = form();
        let mut widget = InsertFormWidget::new();
        type_str(&mut widget, &mut form, "Bob");
        form.cancel();

        widget.sync_from(&form);
        assert_eq!(widget.text(FieldName::FirstName), "");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let (mut form, _rx) = form();
        let mut widget = InsertFormWidget::new();
        widget.paste("Mary\nAnn", &mut form);
        assert_eq!(form.value(FieldName::FirstName), "Mary Ann");
    }

    #[test]
    fn test_popup_render_shows_touched_errors_only() {
        let (mut form, _rx) = form();
        let mut widget = InsertFormWidget::new();
        widget.handle_key(key(KeyCode::Tab), &mut form);

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        widget.render(&form, area, &mut buf, &RosterTheme::default());

        let text = screen(&buf);
        assert!(text.contains("Add New User"));
        assert!(text.contains("First Name is required"));
        assert!(!text.contains("Last Name is required"));
        assert!(text.contains("[ Add User ]"));
    }

    #[test]
    fn test_inline_layout_uses_whole_pane() {
        let (mut form, _rx) = form();
        let pane = Rect::new(40, 3, 50, 20);
        assert_eq!(InsertFormWidget::layout(&form, pane), centered(pane, POPUP_WIDTH, POPUP_HEIGHT));
        form.set_display_mode(DisplayMode::Inline);
        assert_eq!(InsertFormWidget::layout(&form, pane), pane);
    }
}
