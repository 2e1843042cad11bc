use super::rules::FieldError;

/// Per-field bookkeeping: current value, interaction flags and the ordered errors.
///
/// `touched` and `dirty` only decide when an error is shown, never whether the
/// field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    value: String,
    touched: bool,
    dirty: bool,
    errors: Vec<FieldError>,
}

impl FieldState {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// User edit: store the value, mark dirty and swap in fresh errors
    pub(crate) fn edit(&mut self, value: &str, errors: Vec<FieldError>) {
        self.value = value.to_string();
        self.dirty = true;
        self.errors = errors;
    }

    pub(crate) fn revalidate(&mut self, errors: Vec<FieldError>) {
        self.errors = errors;
    }

    pub(crate) fn touch(&mut self) {
        self.touched = true;
    }

    /// Back to pristine: empty value, untouched, not dirty
    pub(crate) fn reset(&mut self, errors: Vec<FieldError>) {
        *self = Self::new(errors);
    }

    /// Highest-priority message, regardless of touched state
    pub fn error_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    /// Message to display: only once the field has been touched
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.error_message()
        } else {
            None
        }
    }
}
