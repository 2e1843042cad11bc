use crate::core::ui_event::{emit, EventSender, UiEvent};
use crate::data::{User, UserInsertData};
use crate::services::{SourceError, UserSource};

/// Next unused id: one past the current maximum, or 1 for an empty list
pub fn next_id(users: &[User]) -> u32 {
    users.iter().map(|u| u.id).max().unwrap_or(0) + 1
}

/// New list with `data` appended as a fresh record; the input slice is left alone
pub fn append_user(users: &[User], data: UserInsertData) -> (Vec<User>, User) {
    let user = User {
        id: next_id(users),
        first_name: data.first_name,
        last_name: data.last_name,
        email: data.email,
        phone: data.phone,
    };
    let next: Vec<User> = users.iter().cloned().chain(std::iter::once(user.clone())).collect();
    (next, user)
}

/// List of users with a highlighted row and a selected record for the detail dialog
#[derive(Debug, Clone)]
pub struct UserListState {
    users: Vec<User>,
    highlighted: usize,
    selected: Option<User>,
    dialog_visible: bool,
    events: EventSender,
}

impl UserListState {
    pub fn new(events: EventSender) -> Self {
        Self {
            users: Vec::new(),
            highlighted: 0,
            selected: None,
            dialog_visible: false,
            events,
        }
    }

    /// Replace the working copy from the data source
    pub async fn load(&mut self, source: &dyn UserSource) -> Result<usize, SourceError> {
        tracing::debug!("Loading users...");
        let users = source.fetch_all().await?;
        tracing::info!("Users loaded: {}", users.len());
        self.set_users(users);
        Ok(self.users.len())
    }

    /// Input from the owner
    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.highlighted = self.highlighted.min(self.users.len().saturating_sub(1));
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, row: usize) {
        if !self.users.is_empty() {
            self.highlighted = row.min(self.users.len() - 1);
        }
    }

    pub fn highlighted_user(&self) -> Option<&User> {
        self.users.get(self.highlighted)
    }

    /// Stable row identity
    pub fn track_by(&self, row: usize) -> Option<u32> {
        self.users.get(row).map(|u| u.id)
    }

    pub fn selected(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    pub fn is_dialog_visible(&self) -> bool {
        self.dialog_visible
    }

    /// "View details" on a row
    pub fn show_details(&mut self, row: usize) -> Option<&User> {
        let user = self.users.get(row)?.clone();
        tracing::debug!("Showing details for user {}", user.id);
        self.highlighted = row;
        self.selected = Some(user.clone());
        self.dialog_visible = true;
        emit(&self.events, UiEvent::DetailsRequested(user));
        self.selected.as_ref()
    }

    pub fn close_details(&mut self) {
        self.dialog_visible = false;
        self.selected = None;
    }

    /// Append a successfully inserted record by replacing the working copy
    pub fn insert(&mut self, data: UserInsertData) -> User {
        let (next, user) = append_user(&self.users, data);
        self.users = next;
        tracing::debug!("Appended user {} at row {}", user.id, self.users.len() - 1);
        user
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.highlighted + 1 < self.users.len() {
            self.highlighted += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.highlighted = 0;
    }

    pub fn move_end(&mut self) {
        self.highlighted = self.users.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ui_event::{channel, drain};
    use crate::services::MockUserService;

    fn data(first: &str) -> UserInsertData {
        UserInsertData {
            first_name: first.into(),
            last_name: "Tester".into(),
            email: "t@example.com".into(),
            phone: "+1-555-000-0000".into(),
        }
    }

    #[test]
    fn test_next_id_on_empty_list_is_one() {
        assert_eq!(next_id(&[]), 1);
        let (users, user) = append_user(&[], data("First"));
        assert_eq!(user.id, 1);
        assert_eq!(users, vec![user]);
    }

    #[tokio::test]
    async fn test_insert_uses_max_plus_one_and_appends_at_tail() {
        let (tx, _rx) = channel();
        let mut list = UserListState::new(tx);
        list.load(&MockUserService::new()).await.unwrap();

        let user = list.insert(data("Newbie"));
        assert_eq!(user.id, 6);
        assert_eq!(list.len(), 6);
        assert_eq!(list.users().last(), Some(&user));
    }

    #[test]
    fn test_id_follows_max_not_length() {
        let (tx, _rx) = channel();
        let mut list = UserListState::new(tx);
        let (seed, _) = append_user(&[], data("A"));
        let mut gap = seed[0].clone();
        gap.id = 10;
        list.set_users(vec![gap, seed[0].clone()]);
        assert_eq!(list.insert(data("B")).id, 11);
    }

    #[test]
    fn test_append_leaves_original_untouched() {
        let (original, _) = append_user(&[], data("A"));
        let (next, _) = append_user(&original, data("B"));
        assert_eq!(original.len(), 1);
        assert_eq!(next.len(), 2);
    }

    #[tokio::test]
    async fn test_show_and_close_details() {
        let (tx, mut rx) = channel();
        let mut list = UserListState::new(tx);
        list.load(&MockUserService::new()).await.unwrap();

        let picked = list.show_details(1).cloned().unwrap();
        assert_eq!(picked.first_name, "Jane");
        assert!(list.is_dialog_visible());
        assert_eq!(list.highlighted(), 1);
        assert_eq!(drain(&mut rx), vec![UiEvent::DetailsRequested(picked)]);

        list.close_details();
        assert!(!list.is_dialog_visible());
        assert!(list.selected().is_none());
    }

    #[test]
    fn test_show_details_out_of_range_is_ignored() {
        let (tx, mut rx) = channel();
        let mut list = UserListState::new(tx);
        assert!(list.show_details(3).is_none());
        assert!(!list.is_dialog_visible());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_navigation_clamps() {
        let (tx, _rx) = channel();
        let mut list = UserListState::new(tx);
        list.load(&MockUserService::new()).await.unwrap();

        list.move_up();
        assert_eq!(list.highlighted(), 0);
        list.move_end();
        assert_eq!(list.highlighted(), 4);
        list.move_down();
        assert_eq!(list.highlighted(), 4);
        assert_eq!(list.track_by(4), Some(5));

        list.set_users(Vec::new());
        assert_eq!(list.highlighted(), 0);
        assert!(list.highlighted_user().is_none());
    }
}
