//! Insert-user form: field validation plus the submission state machine.
//!
//! ```text
//! Idle --submit(valid)--> Submitting --Ok--> SuccessDisplay --dwell--> Idle
//!   ^                          |
//!   +--------(failure)---Err---+
//! ```
//!
//! `submit` on an invalid form never leaves `Idle`; it touches every field and
//! reports a failure. A failed call has no resting phase of its own: the failure
//! result is emitted and the form is back in `Idle` with the draft kept. The remote call itself is an injected [`Submitter`], driven
//! either inline by [`submit_and_settle`] or as background tasks via
//! [`spawn_submission`] and [`spawn_dwell`] that report back over the event channel.

use crate::core::ui_event::{emit, EventSender, UiEvent};
use crate::data::{DisplayMode, InsertResult, UserInsertData};
use crate::services::{SubmitError, Submitter};
use crate::validation::{FieldName, FieldState, FormState, RuleSet, ValidationResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_TITLE: &str = "Add New User";
pub const INVALID_FORM_MESSAGE: &str = "Form is invalid.";
pub const INSERT_SUCCESS_MESSAGE: &str = "User added successfully!";
pub const SUCCESS_BANNER: &str = "User has been added successfully!";
pub const INSERT_FAILED_MESSAGE: &str = "Failed to add user. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    SuccessDisplay,
}

/// Timeouts around the submit call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTiming {
    /// Give up on the submitter after this long
    pub submit_timeout: Duration,
    /// How long the success banner stays up before the form resets
    pub success_dwell: Duration,
}

impl Default for SubmitTiming {
    fn default() -> Self {
        Self {
            submit_timeout: Duration::from_secs(10),
            success_dwell: Duration::from_millis(2000),
        }
    }
}

/// Work handed to the submitter when a valid form enters `Submitting`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub generation: u64,
    pub data: UserInsertData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Valid: call the submitter with this
    Started(PendingSubmission),
    /// Invalid: all fields touched, failure reported
    Refused,
    /// A submission is already in flight or its banner is up
    Busy,
}

#[derive(Debug, Clone)]
pub struct InsertFormState {
    form: FormState,
    display_mode: DisplayMode,
    title: Option<String>,
    visible: bool,
    phase: SubmitPhase,
    pending: Option<UserInsertData>,
    success_message: Option<String>,
    // Bumped on every submit and cancel so late task completions are ignored
    generation: u64,
    events: EventSender,
}

impl InsertFormState {
    pub fn new(rules: RuleSet, events: EventSender) -> Self {
        Self {
            form: FormState::new(rules),
            display_mode: DisplayMode::default(),
            title: None,
            visible: false,
            phase: SubmitPhase::Idle,
            pending: None,
            success_message: None,
            generation: 0,
            events,
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn field(&self, field: FieldName) -> &FieldState {
        self.form.field(field)
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.form.value(field)
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Adding..."
        } else {
            "Add User"
        }
    }

    pub fn is_valid(&self) -> bool {
        self.form.is_valid()
    }

    pub fn is_field_invalid(&self, field: FieldName) -> bool {
        self.form.is_field_invalid(field)
    }

    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        self.form.field_error(field)
    }

    pub fn validation_result(&self) -> ValidationResult {
        self.form.validation_result()
    }

    fn emit_validation(&self) {
        emit(&self.events, UiEvent::ValidationChanged(self.validation_result()));
    }

    /// Keystroke in `field`
    pub fn set_value(&mut self, field: FieldName, value: &str) {
        if self.form.value(field) == value {
            return;
        }
        self.form.set_value(field, value);
        self.emit_validation();
    }

    /// Focus left `field`
    pub fn touch(&mut self, field: FieldName) {
        if self.form.field(field).is_touched() {
            return;
        }
        self.form.touch(field);
        self.emit_validation();
    }

    /// Press of the submit control
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.phase != SubmitPhase::Idle {
            tracing::debug!("Submit ignored while {:?}", self.phase);
            return SubmitOutcome::Busy;
        }

        // Global check: rules are re-run over every field, not only the last edited
        self.form.revalidate();
        if !self.form.is_valid() {
            tracing::debug!("Submit refused: form is invalid");
            self.form.mark_all_touched();
            self.emit_validation();
            emit(
                &self.events,
                UiEvent::Inserted(InsertResult::failed(INVALID_FORM_MESSAGE)),
            );
            return SubmitOutcome::Refused;
        }

        let data = self.form.values();
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(data.clone());
        self.phase = SubmitPhase::Submitting;
        tracing::debug!("Submitting insert (generation {})", self.generation);
        SubmitOutcome::Started(PendingSubmission {
            generation: self.generation,
            data,
        })
    }

    /// Submitter resolved. Returns true when the success dwell should start.
    pub fn complete_submission(
        &mut self,
        generation: u64,
        outcome: Result<(), SubmitError>,
    ) -> bool {
        if generation != self.generation || self.phase != SubmitPhase::Submitting {
            tracing::debug!("Ignoring stale submission result (generation {})", generation);
            return false;
        }
        let data = self.pending.take().unwrap_or_else(|| self.form.values());

        match outcome {
            Ok(()) => {
                emit(
                    &self.events,
                    UiEvent::Inserted(InsertResult::succeeded(data, INSERT_SUCCESS_MESSAGE)),
                );
                self.success_message = Some(SUCCESS_BANNER.to_string());
                self.phase = SubmitPhase::SuccessDisplay;
                true
            }
            Err(e) => {
                tracing::warn!("Insert failed: {}", e);
                self.phase = SubmitPhase::Idle;
                emit(
                    &self.events,
                    UiEvent::Inserted(InsertResult::failed(INSERT_FAILED_MESSAGE)),
                );
                false
            }
        }
    }

    /// Success banner has been up long enough: clear and go back to idle
    pub fn dwell_elapsed(&mut self, generation: u64) {
        if generation != self.generation || self.phase != SubmitPhase::SuccessDisplay {
            tracing::debug!("Ignoring stale dwell timer (generation {})", generation);
            return;
        }
        self.reset();
        self.phase = SubmitPhase::Idle;
        self.emit_validation();
        if self.display_mode.is_popup() {
            emit(&self.events, UiEvent::FormClosed);
        }
    }

    /// Cancel control: discard the draft and ask to be closed.
    ///
    /// Any submission still in flight is orphaned.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.phase = SubmitPhase::Idle;
        self.reset();
        self.emit_validation();
        emit(&self.events, UiEvent::FormClosed);
    }

    fn reset(&mut self) {
        self.form.reset();
        self.success_message = None;
    }
}

/// Call the submitter, treating an overrun of `timeout` as a failure
pub async fn call_submitter(
    submitter: &dyn Submitter,
    data: &UserInsertData,
    timeout: Duration,
) -> Result<(), SubmitError> {
    match tokio::time::timeout(timeout, submitter.submit(data)).await {
        Ok(result) => result,
        Err(_) => Err(SubmitError::Timeout(timeout)),
    }
}

/// Drive one full submit cycle to completion, dwell included
pub async fn submit_and_settle(
    form: &mut InsertFormState,
    submitter: &dyn Submitter,
    timing: SubmitTiming,
) -> SubmitOutcome {
    let pending = match form.submit() {
        SubmitOutcome::Started(pending) => pending,
        other => return other,
    };

    let result = call_submitter(submitter, &pending.data, timing.submit_timeout).await;
    if form.complete_submission(pending.generation, result) {
        tokio::time::sleep(timing.success_dwell).await;
        form.dwell_elapsed(pending.generation);
    }
    SubmitOutcome::Started(pending)
}

/// Run the submitter in the background; completion arrives as `SubmissionFinished`
pub fn spawn_submission(
    submitter: Arc<dyn Submitter>,
    pending: PendingSubmission,
    timeout: Duration,
    events: EventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = call_submitter(submitter.as_ref(), &pending.data, timeout).await;
        emit(
            &events,
            UiEvent::SubmissionFinished {
                generation: pending.generation,
                outcome,
            },
        );
    })
}

/// Fire `DwellElapsed` after the success banner's dwell time
pub fn spawn_dwell(generation: u64, dwell: Duration, events: EventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(dwell).await;
        emit(&events, UiEvent::DwellElapsed { generation });
    })
}
