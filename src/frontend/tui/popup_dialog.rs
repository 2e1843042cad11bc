//! Modal detail dialog drawn over the list.
//!
//! The content rectangle of the last frame is kept so mouse presses can be
//! classified as backdrop or content clicks.

use super::theme::RosterTheme;
use crate::widgets::{ClickTarget, PopupDialogState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const DIALOG_WIDTH: u16 = 56;
const DIALOG_HEIGHT: u16 = 11;

/// Rectangle of `width` x `height` centered in `area`, clipped to it
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

#[derive(Debug, Default)]
pub struct DetailDialog {
    content_area: Option<Rect>,
}

impl DetailDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content rectangle from the last frame the dialog was visible in
    pub fn content_area(&self) -> Option<Rect> {
        self.content_area
    }

    pub fn classify(&self, x: u16, y: u16) -> ClickTarget {
        match self.content_area {
            Some(rect) if contains(rect, x, y) => ClickTarget::Content,
            _ => ClickTarget::Backdrop,
        }
    }

    /// Mouse press while the dialog is up. Returns true when it asked to close.
    pub fn handle_click(&self, x: u16, y: u16, state: &PopupDialogState) -> bool {
        state.is_visible() && state.backdrop_click(self.classify(x, y))
    }

    pub fn render(
        &mut self,
        state: &PopupDialogState,
        area: Rect,
        buf: &mut Buffer,
        theme: &RosterTheme,
    ) {
        if !state.is_visible() {
            self.content_area = None;
            return;
        }

        let popup = centered(area, DIALOG_WIDTH, DIALOG_HEIGHT);
        self.content_area = Some(popup);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.background))
            .title(Span::styled(
                format!(" {} ", state.heading()),
                Style::default()
                    .fg(theme.label_focused)
                    .add_modifier(Modifier::BOLD),
            ));

        let mut lines: Vec<Line> = state
            .detail_rows()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{:<12}", format!("{}:", label)), Style::default().fg(theme.label)),
                    Span::styled(value, Style::default().fg(theme.text)),
                ])
            })
            .collect();

        if lines.is_empty() {
            lines.push(Line::styled("No user selected.", Style::default().fg(theme.muted)));
        }
        lines.push(Line::default());
        lines.push(Line::styled(
            "Esc/Enter: Close  Click outside: Close",
            Style::default().fg(theme.muted),
        ));

        Paragraph::new(lines).block(block).render(popup, buf);
    }
}
