//! Terminal setup plus the `Frontend` implementation over crossterm.

use super::theme::RosterTheme;
use super::view::RosterView;
use crate::core::RosterPage;
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: RosterView,
    poll_timeout: Duration,
    restored: bool,
}

impl TuiFrontend {
    /// Raw mode, alternate screen, mouse capture and bracketed paste
    pub fn new(theme: RosterTheme) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )
        .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            view: RosterView::new(theme),
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            restored: false,
        })
    }

    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            // Releases and repeats are reported on some platforms; only presses count
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(FrontendEvent::Key {
                code: key.code,
                modifiers: key.modifiers,
            }),
            Event::Mouse(mouse) => Some(FrontendEvent::Mouse {
                kind: mouse.kind,
                x: mouse.column,
                y: mouse.row,
                modifiers: mouse.modifiers,
            }),
            Event::Resize(width, height) => Some(FrontendEvent::Resize { width, height }),
            Event::Paste(text) => Some(FrontendEvent::Paste { text }),
            _ => None,
        }
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            if let Some(frontend_event) = Self::convert_event(event::read()?) {
                events.push(frontend_event);
            }
            // Drain whatever else is already queued without waiting again
            timeout = Duration::ZERO;
        }
        Ok(events)
    }

    fn handle_event(&mut self, event: FrontendEvent, page: &mut RosterPage) -> Result<()> {
        if let FrontendEvent::Resize { width, height } = event {
            tracing::debug!("Terminal resized to {}x{}", width, height);
            self.terminal.autoresize()?;
            return Ok(());
        }
        self.view.handle_event(event, page);
        Ok(())
    }

    fn render(&mut self, page: &mut RosterPage) -> Result<()> {
        let view = &mut self.view;
        self.terminal.draw(|f| {
            let area = f.area();
            view.draw(area, f.buffer_mut(), page);
        })?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Restore the terminal even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}
