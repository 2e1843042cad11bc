//! Validation state of a whole form
//!
//! Pure value object: no rendering, no events. The insert form widget wraps it with
//! its submission state machine.

use super::field_state::FieldState;
use super::rules::{FieldName, RuleSet};
use super::ValidationResult;
use crate::data::UserInsertData;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct FormState {
    rules: RuleSet,
    fields: BTreeMap<FieldName, FieldState>,
}

impl FormState {
    /// Build a pristine form; every field is evaluated immediately so an empty
    /// required field starts out invalid (but not yet visible).
    pub fn new(rules: RuleSet) -> Self {
        let fields = FieldName::ALL
            .into_iter()
            .map(|field| (field, FieldState::new(rules.evaluate(field, ""))))
            .collect();
        Self { rules, fields }
    }

    pub fn field(&self, field: FieldName) -> &FieldState {
        &self.fields[&field]
    }

    fn field_mut(&mut self, field: FieldName) -> &mut FieldState {
        self.fields.entry(field).or_default()
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.field(field).value()
    }

    /// Keystroke: update the value and re-run that field's rules
    pub fn set_value(&mut self, field: FieldName, value: &str) {
        let errors = self.rules.evaluate(field, value);
        self.field_mut(field).edit(value, errors);
    }

    /// Focus left the field
    pub fn touch(&mut self, field: FieldName) {
        self.field_mut(field).touch();
    }

    pub fn mark_all_touched(&mut self) {
        self.fields.values_mut().for_each(FieldState::touch);
    }

    /// Re-run every rule against the current values
    pub fn revalidate(&mut self) {
        for (field, state) in self.fields.iter_mut() {
            let errors = self.rules.evaluate(*field, state.value());
            state.revalidate(errors);
        }
    }

    /// Clear values and interaction flags
    pub fn reset(&mut self) {
        for (field, state) in self.fields.iter_mut() {
            state.reset(self.rules.evaluate(*field, ""));
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(FieldState::is_valid)
    }

    /// Invalid and touched: the field shows its error
    pub fn is_field_invalid(&self, field: FieldName) -> bool {
        self.field(field).visible_error().is_some()
    }

    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        self.field(field).visible_error()
    }

    /// Overall validity plus the visible messages of touched, invalid fields
    pub fn validation_result(&self) -> ValidationResult {
        let errors = self
            .fields
            .iter()
            .filter_map(|(field, state)| state.visible_error().map(|msg| (*field, msg.to_string())))
            .collect();
        ValidationResult {
            is_valid: self.is_valid(),
            errors,
        }
    }

    /// Snapshot of the current values
    pub fn values(&self) -> UserInsertData {
        UserInsertData {
            first_name: self.value(FieldName::FirstName).to_string(),
            last_name: self.value(FieldName::LastName).to_string(),
            email: self.value(FieldName::Email).to_string(),
            phone: self.value(FieldName::Phone).to_string(),
        }
    }

    /// Fill all four fields at once (counts as user edits)
    pub fn set_values(&mut self, data: &UserInsertData) {
        self.set_value(FieldName::FirstName, &data.first_name);
        self.set_value(FieldName::LastName, &data.last_name);
        self.set_value(FieldName::Email, &data.email);
        self.set_value(FieldName::Phone, &data.phone);
    }

    pub fn touched_count(&self) -> usize {
        self.fields.values().filter(|f| f.is_touched()).count()
    }
}
