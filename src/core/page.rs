//! Host page: owns canonical roster state and routes widget events.

use crate::config::Config;
use crate::core::ui_event::{self, EventReceiver, EventSender, UiEvent};
use crate::data::{DisplayMode, InsertResult, User};
use crate::services::{Submitter, UserSource};
use crate::validation::{RuleSet, ValidationResult};
use crate::widgets::insert_form::{spawn_dwell, spawn_submission};
use crate::widgets::user_list::append_user;
use crate::widgets::{
    DisplayToggleState, InsertFormState, PopupDialogState, SubmitOutcome, SubmitTiming,
    UserListState,
};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Host page state (frontend-agnostic)
///
/// Owns the canonical user list, display mode and form visibility. Child widgets
/// only see copies pushed down by `sync_inputs` and report back through `UiEvent`s
/// drained by `pump`.
pub struct RosterPage {
    users: Vec<User>,
    display_mode: DisplayMode,
    title: String,
    form_visible: bool,

    /// Most recent insert outcome (drives the status line)
    last_result: Option<InsertResult>,

    /// Most recent validation snapshot from the form
    last_validation: ValidationResult,

    pub list: UserListState,
    pub dialog: PopupDialogState,
    pub toggle: DisplayToggleState,
    pub form: InsertFormState,

    events_tx: EventSender,
    events_rx: EventReceiver,
    submitter: Arc<dyn Submitter>,
    timing: SubmitTiming,

    /// Application running flag
    pub running: bool,
}

impl RosterPage {
    pub fn new(config: &Config, submitter: Arc<dyn Submitter>) -> Result<Self> {
        let (events_tx, events_rx) = ui_event::channel();
        let rules = RuleSet::user_defaults().context("Failed to compile validation rules")?;

        let mut form = InsertFormState::new(rules, events_tx.clone());
        form.set_title(config.ui.title.clone());

        let toggle = DisplayToggleState::new(config.ui.display_mode, events_tx.clone())
            .with_labels(config.ui.inline_label.clone(), config.ui.popup_label.clone());

        let mut page = Self {
            users: Vec::new(),
            display_mode: config.ui.display_mode,
            title: config.ui.page_title.clone(),
            form_visible: false,
            last_result: None,
            last_validation: ValidationResult::default(),
            list: UserListState::new(events_tx.clone()),
            dialog: PopupDialogState::new(events_tx.clone()),
            toggle,
            form,
            events_tx,
            events_rx,
            submitter,
            timing: config.form.timing(),
            running: true,
        };
        page.sync_inputs();
        Ok(page)
    }

    /// Fetch the initial list from `source`
    pub async fn load_users(&mut self, source: &dyn UserSource) -> Result<usize> {
        let users = source.fetch_all().await.context("Failed to load users")?;
        tracing::info!("Loaded {} users", users.len());
        self.users = users;
        self.sync_inputs();
        Ok(self.users.len())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn last_result(&self) -> Option<&InsertResult> {
        self.last_result.as_ref()
    }

    pub fn last_validation(&self) -> &ValidationResult {
        &self.last_validation
    }

    pub fn open_form(&mut self) {
        self.form_visible = true;
        self.sync_inputs();
    }

    /// Submit control pressed; a valid form starts the background submit call
    pub fn submit_form(&mut self) -> SubmitOutcome {
        let outcome = self.form.submit();
        if let SubmitOutcome::Started(pending) = &outcome {
            spawn_submission(
                Arc::clone(&self.submitter),
                pending.clone(),
                self.timing.submit_timeout,
                self.events_tx.clone(),
            );
        }
        self.sync_inputs();
        outcome
    }

    /// Apply every queued event. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Apply one event to canonical state, then push inputs back down
    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::ModeChanged(mode) => {
                tracing::info!("Display mode changed to {}", mode);
                self.display_mode = mode;
            }
            UiEvent::Inserted(result) => {
                if let (true, Some(data)) = (result.success, result.data.clone()) {
                    let (users, user) = append_user(&self.users, data);
                    self.users = users;
                    tracing::info!("Inserted user {} ({})", user.id, user.full_name());
                } else {
                    tracing::warn!("Insert did not succeed: {}", result.message);
                }
                self.last_result = Some(result);
            }
            UiEvent::ValidationChanged(result) => {
                self.last_validation = result;
            }
            UiEvent::FormClosed => {
                self.form_visible = false;
            }
            UiEvent::DetailsRequested(user) => {
                tracing::debug!("Details requested for user {}", user.id);
            }
            UiEvent::DialogClosed => {
                self.list.close_details();
            }
            UiEvent::SubmissionFinished {
                generation,
                outcome,
            } => {
                if self.form.complete_submission(generation, outcome) {
                    spawn_dwell(generation, self.timing.success_dwell, self.events_tx.clone());
                }
            }
            UiEvent::DwellElapsed { generation } => {
                self.form.dwell_elapsed(generation);
            }
        }
        self.sync_inputs();
    }

    /// Re-supply canonical state to every child
    fn sync_inputs(&mut self) {
        if self.list.users() != self.users.as_slice() {
            self.list.set_users(self.users.clone());
        }

        self.toggle.set_mode(self.display_mode);
        self.toggle.set_disabled(self.form.is_submitting());

        self.form.set_display_mode(self.display_mode);
        self.form.set_visible(self.form_visible);

        self.dialog.set_user(self.list.selected().cloned());
        self.dialog.set_visible(self.list.is_dialog_visible());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MockUserService, SimulatedSubmitter};
    use crate::validation::FieldName;
    use crate::widgets::SubmitPhase;
    use std::time::Duration;

    async fn page() -> RosterPage {
        let submitter = Arc::new(SimulatedSubmitter::new(Duration::ZERO));
        let mut page = RosterPage::new(&Config::default(), submitter).unwrap();
        page.load_users(&MockUserService::new()).await.unwrap();
        page
    }

    fn fill(page: &mut RosterPage) {
        page.form.set_value(FieldName::FirstName, "Grace");
        page.form.set_value(FieldName::LastName, "Hopper");
        page.form.set_value(FieldName::Email, "grace@navy.mil");
        page.form.set_value(FieldName::Phone, "+1-555-010-2030");
    }

    async fn advance(page: &mut RosterPage, by: Duration) {
        tokio::time::sleep(by).await;
        page.pump();
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_insert_flow() {
        let mut page = page().await;
        page.open_form();
        assert!(page.form.is_visible());
        fill(&mut page);

        assert!(matches!(page.submit_form(), SubmitOutcome::Started(_)));
        assert!(page.toggle.is_disabled());

        advance(&mut page, Duration::from_millis(1)).await;
        assert_eq!(page.users().len(), 6);
        assert_eq!(page.users()[5].id, 6);
        assert_eq!(page.list.len(), 6);
        assert_eq!(page.form.phase(), SubmitPhase::SuccessDisplay);
        assert!(page.last_result().unwrap().success);
        assert!(page.is_form_visible());

        advance(&mut page, Duration::from_millis(2100)).await;
        assert_eq!(page.form.phase(), SubmitPhase::Idle);
        assert!(!page.is_form_visible());
        assert!(!page.form.is_visible());
        assert_eq!(page.form.value(FieldName::FirstName), "");
        assert!(!page.toggle.is_disabled());
    }

    #[tokio::test]
    async fn test_invalid_submit_records_failure() {
        let mut page = page().await;
        page.open_form();
        assert_eq!(page.submit_form(), SubmitOutcome::Refused);
        page.pump();

        let result = page.last_result().unwrap();
        assert!(!result.success);
        assert_eq!(page.last_validation().errors.len(), 4);
        assert_eq!(page.users().len(), 5);
        assert!(page.is_form_visible());
    }

    #[tokio::test]
    async fn test_mode_change_flows_back_down() {
        let mut page = page().await;
        page.toggle.toggle();
        page.pump();
        assert_eq!(page.display_mode(), DisplayMode::Inline);
        assert_eq!(page.form.display_mode(), DisplayMode::Inline);

        page.toggle.toggle();
        page.pump();
        assert_eq!(page.display_mode(), DisplayMode::Popup);
    }

    #[tokio::test]
    async fn test_details_open_and_close_through_events() {
        let mut page = page().await;
        page.list.show_details(2);
        page.pump();
        assert!(page.dialog.is_visible());
        assert_eq!(page.dialog.user().map(|u| u.id), Some(3));

        page.dialog.close();
        page.pump();
        assert!(!page.dialog.is_visible());
        assert!(page.dialog.user().is_none());
    }

    #[tokio::test]
    async fn test_cancel_hides_form() {
        let mut page = page().await;
        page.open_form();
        fill(&mut page);
        page.form.cancel();
        page.pump();
        assert!(!page.is_form_visible());
        assert_eq!(page.form.value(FieldName::Email), "");
    }

    #[tokio::test]
    async fn test_cancel_clears_stale_validation() {
        let mut page = page().await;
        page.open_form();
        page.submit_form();
        page.pump();
        assert_eq!(page.last_validation().errors.len(), 4);

        page.form.cancel();
        page.pump();
        assert_eq!(page.last_validation(), &page.form.validation_result());
        assert!(page.last_validation().errors.is_empty());
    }
}
