//! Client-side form validation
//!
//! Declarative rule sets, per-field interaction state and the aggregate
//! [`ValidationResult`] reported to the form's owner.

pub mod field_state;
pub mod form;
pub mod rules;

pub use field_state::FieldState;
pub use form::FormState;
pub use rules::{FieldError, FieldName, Rule, RuleKind, RuleSet, ValidationError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overall validity plus the visible error of each touched, invalid field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<FieldName, String>,
}
