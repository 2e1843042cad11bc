//! Screen layout and input routing for the roster page.
//!
//! ```text
//! +- title ------------------------------- [ Show Inline (m) ] -+
//! | users table                 | inline form (inline mode only) |
//! +- status line ------------------------------------------------+
//! ```
//!
//! The popup form and the detail dialog are drawn over everything else.

use super::display_toggle;
use super::insert_form::{FormAction, InsertFormWidget};
use super::popup_dialog::{contains, DetailDialog};
use super::theme::RosterTheme;
use super::user_list::UserTable;
use super::widget_traits::Navigable;
use crate::core::RosterPage;
use crate::frontend::FrontendEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const LIST_HELP: &str = "Up/Down:Move  Enter:Details  a:Add User  m:Toggle Mode  q:Quit";

pub struct RosterView {
    theme: RosterTheme,
    table: UserTable,
    form: InsertFormWidget,
    dialog: DetailDialog,
    toggle_area: Option<Rect>,
    screen_area: Option<Rect>,
}

impl RosterView {
    pub fn new(theme: RosterTheme) -> Self {
        Self {
            theme,
            table: UserTable::new(),
            form: InsertFormWidget::new(),
            dialog: DetailDialog::new(),
            toggle_area: None,
            screen_area: None,
        }
    }

    pub fn handle_event(&mut self, event: FrontendEvent, page: &mut RosterPage) {
        if let Some((x, y)) = event.left_click() {
            self.handle_click(x, y, page);
            return;
        }
        match event {
            FrontendEvent::Paste { text } if page.form.is_visible() => {
                self.form.paste(&text, &mut page.form);
            }
            FrontendEvent::Key { code, modifiers } => {
                self.handle_key(KeyEvent::new(code, modifiers), page);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, page: &mut RosterPage) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            page.running = false;
            return;
        }

        if page.dialog.is_visible() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                page.dialog.close();
            }
            return;
        }

        if page.form.is_visible() {
            self.form.sync_from(&page.form);
            match self.form.handle_key(key, &mut page.form) {
                FormAction::Submit => {
                    let outcome = page.submit_form();
                    tracing::debug!("Submit pressed: {:?}", outcome);
                }
                FormAction::Cancel => page.form.cancel(),
                FormAction::None => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => page.list.navigate_up(),
            KeyCode::Down | KeyCode::Char('j') => page.list.navigate_down(),
            KeyCode::PageUp => page.list.page_up(),
            KeyCode::PageDown => page.list.page_down(),
            KeyCode::Home => page.list.home(),
            KeyCode::End => page.list.end(),
            KeyCode::Enter => {
                let row = page.list.highlighted();
                page.list.show_details(row);
            }
            KeyCode::Char('a') => page.open_form(),
            KeyCode::Char('m') => {
                page.toggle.toggle();
            }
            KeyCode::Char('q') => page.running = false,
            _ => {}
        }
    }

    fn handle_click(&mut self, x: u16, y: u16, page: &mut RosterPage) {
        if page.dialog.is_visible() {
            self.dialog.handle_click(x, y, &page.dialog);
            return;
        }
        // The popup form is modal: nothing behind it takes clicks
        if page.form.is_visible() && page.display_mode().is_popup() {
            let outside = self
                .screen_area
                .map(|screen| !contains(InsertFormWidget::layout(&page.form, screen), x, y))
                .unwrap_or(false);
            if outside {
                page.form.cancel();
            }
            return;
        }
        if let Some(area) = self.toggle_area {
            if contains(area, x, y) {
                page.toggle.toggle();
            }
        }
    }

    pub fn draw(&mut self, area: Rect, buf: &mut Buffer, page: &RosterPage) {
        self.screen_area = Some(area);
        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        self.draw_header(header, buf, page);

        let inline_form = page.form.is_visible() && !page.display_mode().is_popup();
        let list_focused = !page.form.is_visible() && !page.dialog.is_visible();
        if inline_form {
            let [list_area, form_area] =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(body);
            self.table
                .render(&page.list, list_area, buf, &self.theme, list_focused);
            self.form.render(&page.form, form_area, buf, &self.theme);
        } else {
            self.table.render(&page.list, body, buf, &self.theme, list_focused);
        }

        self.draw_status(status, buf, page);

        if page.form.is_visible() && page.display_mode().is_popup() {
            self.form.render(&page.form, area, buf, &self.theme);
        }
        self.dialog.render(&page.dialog, area, buf, &self.theme);
    }

    fn draw_header(&mut self, area: Rect, buf: &mut Buffer, page: &RosterPage) {
        let width = display_toggle::button_width(&page.toggle).min(area.width);
        let [title_area, toggle_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(width)]).areas(area);

        Paragraph::new(Line::from(Span::styled(
            page.title(),
            Style::default()
                .fg(self.theme.label)
                .add_modifier(Modifier::BOLD),
        )))
        .render(title_area, buf);

        display_toggle::render(&page.toggle, toggle_area, buf, &self.theme);
        self.toggle_area = Some(toggle_area);
    }

    fn draw_status(&self, area: Rect, buf: &mut Buffer, page: &RosterPage) {
        let line = match page.last_result() {
            Some(result) => {
                let color = if result.success {
                    self.theme.success
                } else {
                    self.theme.error
                };
                Line::from(vec![
                    Span::styled(result.message.clone(), Style::default().fg(color)),
                    Span::raw("  "),
                    Span::styled(LIST_HELP, Style::default().fg(self.theme.muted)),
                ])
            }
            None => Line::styled(LIST_HELP, Style::default().fg(self.theme.muted)),
        };
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::DisplayMode;
    use crate::services::{MockUserService, SimulatedSubmitter};
    use crate::validation::FieldName;
    use std::sync::Arc;
    use std::time::Duration;

    async fn setup() -> (RosterView, RosterPage) {
        let submitter = Arc::new(SimulatedSubmitter::new(Duration::ZERO));
        let mut page = RosterPage::new(&Config::default(), submitter).unwrap();
        page.load_users(&MockUserService::new()).await.unwrap();
        (RosterView::new(RosterTheme::default()), page)
    }

    fn press(view: &mut RosterView, page: &mut RosterPage, code: KeyCode) {
        view.handle_event(FrontendEvent::key(code, KeyModifiers::NONE), page);
        page.pump();
    }

    fn type_str(view: &mut RosterView, page: &mut RosterPage, text: &str) {
        for c in text.chars() {
            press(view, page, KeyCode::Char(c));
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

    #[tokio::test]
    async fn test_enter_opens_details_and_backdrop_click_closes() {
        let (mut view, mut page) = setup().await;
        press(&mut view, &mut page, KeyCode::Down);
        press(&mut view, &mut page, KeyCode::Enter);
        assert!(page.dialog.is_visible());
        assert_eq!(page.dialog.user().map(|u| u.id), Some(2));

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        view.draw(area, &mut buf, &page);
        assert!(screen(&buf).contains("Jane Smith"));

        view.handle_event(FrontendEvent::click(0, 0), &mut page);
        page.pump();
        assert!(!page.dialog.is_visible());
    }

    #[tokio::test]
    async fn test_keys_go_to_form_while_visible() {
        let (mut view, mut page) = setup().await;
        press(&mut view, &mut page, KeyCode::Char('a'));
        assert!(page.is_form_visible());

        // 'q' and 'm' are text while the form has focus
        type_str(&mut view, &mut page, "qm");
        assert!(page.running);
        assert_eq!(page.display_mode(), DisplayMode::Popup);
        assert_eq!(page.form.value(FieldName::FirstName), "qm");

        press(&mut view, &mut page, KeyCode::Esc);
        assert!(!page.is_form_visible());
        assert_eq!(page.form.value(FieldName::FirstName), "");
    }

    #[tokio::test]
    async fn test_invalid_submit_shows_failure_in_status() {
        let (mut view, mut page) = setup().await;
        press(&mut view, &mut page, KeyCode::Char('a'));
        press(&mut view, &mut page, KeyCode::Enter);

        let area = Rect::new(0, 0, 110, 30);
        let mut buf = Buffer::empty(area);
        view.draw(area, &mut buf, &page);
        let text = screen(&buf);
        assert!(text.contains("Form is invalid."));
        assert!(text.contains("Email is required"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_inline_insert_through_keys() {
        let (mut view, mut page) = setup().await;
        press(&mut view, &mut page, KeyCode::Char('m'));
        assert_eq!(page.display_mode(), DisplayMode::Inline);
        press(&mut view, &mut page, KeyCode::Char('a'));

        for (text, last) in [
            ("Ada", false),
            ("Lovelace", false),
            ("ada@example.com", false),
            ("+44 20 7946 0958", true),
        ] {
            type_str(&mut view, &mut page, text);
            if !last {
                press(&mut view, &mut page, KeyCode::Tab);
            }
        }
        press(&mut view, &mut page, KeyCode::Enter);
        assert!(page.form.is_submitting());

        tokio::time::sleep(Duration::from_millis(1)).await;
        page.pump();
        assert_eq!(page.users().len(), 6);
        assert_eq!(page.users()[5].full_name(), "Ada Lovelace");

        tokio::time::sleep(Duration::from_millis(2100)).await;
        page.pump();
        // Inline forms stay open after the reset
        assert!(page.is_form_visible());
        assert_eq!(page.form.value(FieldName::Email), "");

        let area = Rect::new(0, 0, 140, 30);
        let mut buf = Buffer::empty(area);
        view.draw(area, &mut buf, &page);
        assert!(screen(&buf).contains("Users (6)"));
    }

    #[tokio::test]
    async fn test_clicking_toggle_switches_mode() {
        let (mut view, mut page) = setup().await;
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        view.draw(area, &mut buf, &page);

        let toggle = view.toggle_area.unwrap();
        view.handle_event(FrontendEvent::click(toggle.x + 1, toggle.y), &mut page);
        page.pump();
        assert_eq!(page.display_mode(), DisplayMode::Inline);
    }

    #[tokio::test]
    async fn test_popup_form_blocks_toggle_click() {
        let (mut view, mut page) = setup().await;
        press(&mut view, &mut page, KeyCode::Char('a'));
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        view.draw(area, &mut buf, &page);

        let toggle = view.toggle_area.unwrap();
        view.handle_event(FrontendEvent::click(toggle.x + 1, toggle.y), &mut page);
        page.pump();
        assert_eq!(page.display_mode(), DisplayMode::Popup);
    }

    #[tokio::test]
    async fn test_click_outside_popup_form_cancels_it() {
        let (mut view, mut page) = setup().await;
        press(&mut view, &mut page, KeyCode::Char('a'));
        type_str(&mut view, &mut page, "Ada");
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        view.draw(area, &mut buf, &page);

        // Inside the form: stays open
        let form_area = InsertFormWidget::layout(&page.form, area);
        view.handle_event(FrontendEvent::click(form_area.x + 2, form_area.y + 2), &mut page);
        page.pump();
        assert!(page.is_form_visible());

        view.handle_event(FrontendEvent::click(0, 29), &mut page);
        page.pump();
        assert!(!page.is_form_visible());
        assert_eq!(page.form.value(FieldName::FirstName), "");
    }

    #[tokio::test]
    async fn test_q_quits_from_list() {
        let (mut view, mut page) = setup().await;
        press(&mut view, &mut page, KeyCode::Char('q'));
        assert!(!page.running);
    }
}
