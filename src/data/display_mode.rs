use serde::{Deserialize, Serialize};
use std::fmt;

/// How the insert form and detail view are presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Popup,
    Inline,
}

impl DisplayMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Popup => DisplayMode::Inline,
            DisplayMode::Inline => DisplayMode::Popup,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Popup => "popup",
            DisplayMode::Inline => "inline",
        }
    }

    pub fn is_popup(self) -> bool {
        self == DisplayMode::Popup
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_flips_between_modes() {
        assert_eq!(DisplayMode::Popup.toggled(), DisplayMode::Inline);
        assert_eq!(DisplayMode::Inline.toggled(), DisplayMode::Popup);
        assert_eq!(DisplayMode::default(), DisplayMode::Popup);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&DisplayMode::Inline).unwrap();
        assert_eq!(json, "\"inline\"");
        let mode: DisplayMode = serde_json::from_str("\"popup\"").unwrap();
        assert_eq!(mode, DisplayMode::Popup);
    }
}
