//! Declarative per-field rule sets
//!
//! A [`RuleSet`] maps each [`FieldName`] to an ordered list of rules. Each rule pairs a
//! predicate ([`RuleKind`]) with a message template. Failures are always reported in the
//! fixed priority order of [`ValidationError`], whatever order the rules were declared in.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Phone numbers: optional leading '+', then 10-15 digits, spaces, dashes or parentheses
pub const PHONE_PATTERN: &str = r"^[+]?[0-9\s\-()]{10,15}$";

const EMAIL_PATTERN: &str = r#"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$"#;
const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;

/// The four inputs of the insert form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Email,
        FieldName::Phone,
    ];

    /// Human-readable label used in messages and on screen
    pub fn label(self) -> &'static str {
        match self {
            FieldName::FirstName => "First Name",
            FieldName::LastName => "Last Name",
            FieldName::Email => "Email",
            FieldName::Phone => "Phone",
        }
    }

    /// Wire key (matches the serde name)
    pub fn key(self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldName::FirstName => "Enter first name",
            FieldName::LastName => "Enter last name",
            FieldName::Email => "Enter email address",
            FieldName::Phone => "Enter phone number",
        }
    }

    /// Position in [`FieldName::ALL`]
    pub fn index(self) -> usize {
        match self {
            FieldName::FirstName => 0,
            FieldName::LastName => 1,
            FieldName::Email => 2,
            FieldName::Phone => 3,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single failed rule. Variant order is display priority.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationError {
    Required,
    MinLength { required: usize, actual: usize },
    MaxLength { required: usize, actual: usize },
    Email,
    Pattern { pattern: String },
    Invalid,
}

impl ValidationError {
    /// Lower is shown first
    pub fn priority(&self) -> u8 {
        match self {
            ValidationError::Required => 0,
            ValidationError::MinLength { .. } => 1,
            ValidationError::MaxLength { .. } => 2,
            ValidationError::Email => 3,
            ValidationError::Pattern { .. } => 4,
            ValidationError::Invalid => 5,
        }
    }
}

/// A failed rule together with its rendered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub error: ValidationError,
    pub message: String,
}

/// Predicate half of a rule
#[derive(Debug, Clone)]
pub enum RuleKind {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email(Regex),
    Pattern(Regex),
    /// Free-form predicate; true means valid
    Custom(fn(&str) -> bool),
}

impl RuleKind {
    /// Returns the failure for `value`, or None when the rule passes.
    ///
    /// Everything except `Required` accepts an empty value.
    fn check(&self, value: &str) -> Option<ValidationError> {
        let len = value.chars().count();
        match self {
            RuleKind::Required => value.is_empty().then_some(ValidationError::Required),
            _ if value.is_empty() => None,
            RuleKind::MinLength(min) => (len < *min).then_some(ValidationError::MinLength {
                required: *min,
                actual: len,
            }),
            RuleKind::MaxLength(max) => (len > *max).then_some(ValidationError::MaxLength {
                required: *max,
                actual: len,
            }),
            RuleKind::Email(re) => (!is_email_shaped(re, value)).then_some(ValidationError::Email),
            RuleKind::Pattern(re) => (!re.is_match(value)).then(|| ValidationError::Pattern {
                pattern: re.as_str().to_string(),
            }),
            RuleKind::Custom(accepts) => (!accepts(value)).then_some(ValidationError::Invalid),
        }
    }
}

fn is_email_shaped(re: &Regex, value: &str) -> bool {
    if value.len() > EMAIL_MAX_LEN {
        return false;
    }
    match value.split_once('@') {
        Some((local, _)) if local.len() <= EMAIL_LOCAL_MAX_LEN => re.is_match(value),
        _ => false,
    }
}

/// A predicate paired with a message template.
///
/// Templates may use `{label}` (the field label) and `{length}` (the limit of a length rule).
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    message: String,
}

impl Rule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn required() -> Self {
        Self::new(RuleKind::Required, "{label} is required")
    }

    pub fn min_length(min: usize) -> Self {
        Self::new(
            RuleKind::MinLength(min),
            "{label} must be at least {length} characters",
        )
    }

    pub fn max_length(max: usize) -> Self {
        Self::new(
            RuleKind::MaxLength(max),
            "{label} must not exceed {length} characters",
        )
    }

    pub fn email() -> Result<Self, regex::Error> {
        Ok(Self::new(
            RuleKind::Email(Regex::new(EMAIL_PATTERN)?),
            "Please enter a valid email address",
        ))
    }

    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::new(RuleKind::Pattern(Regex::new(pattern)?), message))
    }

    /// Rule backed by an arbitrary predicate, reported as "Invalid input"
    pub fn custom(accepts: fn(&str) -> bool) -> Self {
        Self::new(RuleKind::Custom(accepts), GENERIC_INVALID_MESSAGE)
    }

    /// Replace the message template
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn render(&self, field: FieldName, error: &ValidationError) -> String {
        let length = match error {
            ValidationError::MinLength { required, .. }
            | ValidationError::MaxLength { required, .. } => required.to_string(),
            _ => String::new(),
        };
        self.message
            .replace("{label}", field.label())
            .replace("{length}", &length)
    }
}

/// Message used when a field is invalid but no rule produced a message
pub const GENERIC_INVALID_MESSAGE: &str = "Invalid input";

/// Mapping from field to its ordered rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<FieldName, Vec<Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the rules of one field, replacing any previous ones
    pub fn with_field(mut self, field: FieldName, rules: Vec<Rule>) -> Self {
        self.rules.insert(field, rules);
        self
    }

    /// Rules of the "add user" form
    pub fn user_defaults() -> Result<Self, regex::Error> {
        let name_rules = || {
            vec![
                Rule::required(),
                Rule::min_length(NAME_MIN_LEN),
                Rule::max_length(NAME_MAX_LEN),
            ]
        };
        Ok(Self::new()
            .with_field(FieldName::FirstName, name_rules())
            .with_field(FieldName::LastName, name_rules())
            .with_field(FieldName::Email, vec![Rule::required(), Rule::email()?])
            .with_field(
                FieldName::Phone,
                vec![
                    Rule::required(),
                    Rule::pattern(PHONE_PATTERN, "Please enter a valid phone number")?,
                ],
            ))
    }

    pub fn rules_for(&self, field: FieldName) -> &[Rule] {
        self.rules.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Evaluate every rule of `field` against `value`.
    ///
    /// The result is sorted by priority, so the first entry is the message to display.
    pub fn evaluate(&self, field: FieldName, value: &str) -> Vec<FieldError> {
        let mut errors: Vec<FieldError> = self
            .rules_for(field)
            .iter()
            .filter_map(|rule| {
                rule.kind.check(value).map(|error| FieldError {
                    message: rule.render(field, &error),
                    error,
                })
            })
            .collect();
        errors.sort_by_key(|e| e.error.priority());
        errors
    }
}
