use crate::core::ui_event::{emit, EventSender, UiEvent};
use crate::data::DisplayMode;

pub const DEFAULT_INLINE_LABEL: &str = "Show Inline";
pub const DEFAULT_POPUP_LABEL: &str = "Show Popup";

/// Two-position switch between popup and inline presentation.
///
/// Holds a copy of the owner's mode for rendering only. The owner stays the durable
/// holder and pushes the mode back in with [`DisplayToggleState::set_mode`].
#[derive(Debug, Clone)]
pub struct DisplayToggleState {
    mode: DisplayMode,
    inline_label: String,
    popup_label: String,
    disabled: bool,
    events: EventSender,
}

impl DisplayToggleState {
    pub fn new(mode: DisplayMode, events: EventSender) -> Self {
        Self {
            mode,
            inline_label: DEFAULT_INLINE_LABEL.to_string(),
            popup_label: DEFAULT_POPUP_LABEL.to_string(),
            disabled: false,
            events,
        }
    }

    pub fn with_labels(mut self, inline_label: impl Into<String>, popup_label: impl Into<String>) -> Self {
        self.inline_label = inline_label.into();
        self.popup_label = popup_label.into();
        self
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Flip the mode and notify the owner. Returns the new mode, or None when disabled.
    pub fn toggle(&mut self) -> Option<DisplayMode> {
        if self.disabled {
            tracing::debug!("Display toggle is disabled; ignoring");
            return None;
        }
        self.mode = self.mode.toggled();
        tracing::debug!("Display mode toggled to {}", self.mode);
        emit(&self.events, UiEvent::ModeChanged(self.mode));
        Some(self.mode)
    }

    /// Button caption: names the mode the click switches to
    pub fn button_text(&self) -> &str {
        match self.mode {
            DisplayMode::Popup => &self.inline_label,
            DisplayMode::Inline => &self.popup_label,
        }
    }

    pub fn aria_label(&self) -> String {
        format!("Switch to {} display mode", self.mode.toggled())
    }
}
