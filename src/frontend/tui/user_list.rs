//! Table view of the user list with a highlighted row.

use super::theme::RosterTheme;
use super::widget_traits::Navigable;
use crate::widgets::UserListState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

const PAGE_SIZE: usize = 10;

impl Navigable for UserListState {
    fn navigate_up(&mut self) {
        self.move_up();
    }

    fn navigate_down(&mut self) {
        self.move_down();
    }

    fn page_up(&mut self) {
        self.set_highlighted(self.highlighted().saturating_sub(PAGE_SIZE));
    }

    fn page_down(&mut self) {
        self.set_highlighted(self.highlighted() + PAGE_SIZE);
    }

    fn home(&mut self) {
        self.move_home();
    }

    fn end(&mut self) {
        self.move_end();
    }
}

/// Keeps the table's scroll offset between frames
#[derive(Debug, Default)]
pub struct UserTable {
    table_state: TableState,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        list: &UserListState,
        area: Rect,
        buf: &mut Buffer,
        theme: &RosterTheme,
        focused: bool,
    ) {
        let border_color = if focused { theme.label_focused } else { theme.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" Users ({}) ", list.len()));

        if list.is_empty() {
            Paragraph::new(Line::styled("No users found.", Style::default().fg(theme.muted)))
                .block(block)
                .render(area, buf);
            return;
        }

        let header = Row::new(["ID", "Name", "Email", "Phone"])
            .style(Style::default().fg(theme.label).add_modifier(Modifier::BOLD));

        let rows = list.users().iter().map(|user| {
            Row::new([
                Cell::from(user.id.to_string()),
                Cell::from(user.full_name()),
                Cell::from(user.email.clone()),
                Cell::from(user.phone.clone()),
            ])
            .style(Style::default().fg(theme.text))
        });

        let widths = [
            Constraint::Length(4),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Fill(1),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .fg(theme.background)
                    .bg(theme.label_focused)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        self.table_state.select(Some(list.highlighted()));
        StatefulWidget::render(table, area, buf, &mut self.table_state);
    }
}
