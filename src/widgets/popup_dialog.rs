use crate::core::ui_event::{emit, EventSender, UiEvent};
use crate::data::User;

/// Where a pointer press landed relative to the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the content
    Backdrop,
    /// Anywhere inside the content box
    Content,
}

/// Detail dialog for one user.
///
/// Visibility and the record are inputs; the dialog only ever asks to be closed.
#[derive(Debug, Clone)]
pub struct PopupDialogState {
    visible: bool,
    user: Option<User>,
    events: EventSender,
}

impl PopupDialogState {
    pub fn new(events: EventSender) -> Self {
        Self {
            visible: false,
            user: None,
            events,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Dismiss control pressed
    pub fn close(&self) {
        emit(&self.events, UiEvent::DialogClosed);
    }

    /// Pointer press; only a press on the backdrop itself closes
    pub fn backdrop_click(&self, target: ClickTarget) -> bool {
        if target == ClickTarget::Backdrop {
            self.close();
            true
        } else {
            false
        }
    }

    /// Label/value pairs shown in the content area
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        match &self.user {
            Some(user) => vec![
                ("ID", user.id.to_string()),
                ("First Name", user.first_name.clone()),
                ("Last Name", user.last_name.clone()),
                ("Email", user.email.clone()),
                ("Phone", user.phone.clone()),
            ],
            None => Vec::new(),
        }
    }

    pub fn heading(&self) -> String {
        match &self.user {
            Some(user) => user.full_name(),
            None => "User Details".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ui_event::{channel, drain};

    fn jane() -> User {
        User {
            id: 2,
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            email: "jane.smith@example.com".into(),
            phone: "+1-555-987-6543".into(),
        }
    }

    #[test]
    fn test_backdrop_click_closes_content_click_does_not() {
        let (tx, mut rx) = channel();
        let dialog = PopupDialogState::new(tx);

        assert!(!dialog.backdrop_click(ClickTarget::Content));
        assert!(drain(&mut rx).is_empty());

        assert!(dialog.backdrop_click(ClickTarget::Backdrop));
        assert_eq!(drain(&mut rx), vec![UiEvent::DialogClosed]);
    }

    #[test]
    fn test_close_does_not_change_visibility_itself() {
        let (tx, mut rx) = channel();
        let mut dialog = PopupDialogState::new(tx);
        dialog.set_visible(true);
        dialog.close();
        assert!(dialog.is_visible());
        assert_eq!(drain(&mut rx), vec![UiEvent::DialogClosed]);
    }

    #[test]
    fn test_detail_rows() {
        let (tx, _rx) = channel();
        let mut dialog = PopupDialogState::new(tx);
        assert!(dialog.detail_rows().is_empty());
        assert_eq!(dialog.heading(), "User Details");

        dialog.set_user(Some(jane()));
        let rows = dialog.detail_rows();
        assert_eq!(rows[0], ("ID", "2".to_string()));
        assert_eq!(rows[3], ("Email", "jane.smith@example.com".to_string()));
        assert_eq!(dialog.heading(), "Jane Smith");
    }
}
