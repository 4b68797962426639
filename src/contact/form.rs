//! Contact form state machine
//!
//! ```text
//!  Idle ──begin_submit──▶ (validate) ──▶ Invalid ──edit──▶ Idle
//!                              │
//!                              ▼
//!                         Submitting ──finish_submit──▶ Succeeded (fields cleared)
//!                                                   └──▶ Failed    (fields kept)
//! ```
//!
//! Only one submission may be in flight; `begin_submit` refuses while one is.
//! The fields are read-only while `Submitting`, so the input cleared on
//! success is exactly the input that was sent.

use super::transport::SubmissionResult;
use super::{validate, ContactFormInput, Field, FieldErrors, FieldIssue, ValidContact};

/// Focusable controls inside the form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Submit,
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::Field(Field::Name),
        Focus::Field(Field::Email),
        Focus::Field(Field::Message),
        Focus::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// Where the form is in its submit lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    /// Last submit attempt failed validation
    Invalid,
    Submitting,
    Succeeded,
    Failed { message: String },
}

/// Why `begin_submit` did not start a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    InFlight,
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    input: ContactFormInput,
    focus: Option<Focus>,
    errors: FieldErrors,
    status: FormStatus,
    /// Errors are only shown (and re-checked on edit) after a submit attempt
    attempted: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.input.name,
            Field::Email => &self.input.email,
            Field::Message => &self.input.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.input.name,
            Field::Email => &mut self.input.email,
            Field::Message => &mut self.input.message,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<FieldIssue> {
        self.errors.get(field)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────────────

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<Focus>) {
        self.focus = focus;
    }

    pub fn focus_next(&mut self) {
        self.focus = Some(self.focus.map_or(Focus::ORDER[0], Focus::next));
    }

    pub fn focus_prev(&mut self) {
        self.focus = Some(self.focus.map_or(Focus::Submit, Focus::prev));
    }

    pub fn focused_field(&self) -> Option<Field> {
        match self.focus {
            Some(Focus::Field(field)) => Some(field),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────

    /// Field being edited, if edits are allowed right now
    fn editable_field(&self) -> Option<Field> {
        if self.is_submitting() {
            return None;
        }
        self.focused_field()
    }

    /// Append to the focused field; returns false when no field is focused
    /// or a submission is in flight
    pub fn insert_char(&mut self, c: char) -> bool {
        let Some(field) = self.editable_field() else {
            return false;
        };
        if c.is_control() {
            return false;
        }
        self.value_mut(field).push(c);
        self.after_edit();
        true
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) -> bool {
        let Some(field) = self.editable_field() else {
            return false;
        };
        if self.value_mut(field).pop().is_none() {
            return false;
        }
        self.after_edit();
        true
    }

    /// Replace a field's contents; refused while a submission is in flight
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self.value_mut(field) = value.into();
        self.after_edit();
        true
    }

    fn after_edit(&mut self) {
        if self.attempted {
            self.errors = match validate(&self.input) {
                Ok(_) => FieldErrors::default(),
                Err(errors) => errors,
            };
        }
        if matches!(
            self.status,
            FormStatus::Invalid | FormStatus::Succeeded | FormStatus::Failed { .. }
        ) {
            self.status = FormStatus::Idle;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────

    /// Validate and enter `Submitting`, handing back the payload to send
    pub fn begin_submit(&mut self) -> Result<ValidContact, SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::InFlight);
        }

        self.attempted = true;
        match validate(&self.input) {
            Ok(valid) => {
                self.errors = FieldErrors::default();
                self.status = FormStatus::Submitting;
                Ok(valid)
            }
            Err(errors) => {
                tracing::debug!(field_count = errors.len(), "contact form invalid");
                self.errors = errors.clone();
                self.status = FormStatus::Invalid;
                // Jump to the first offending field
                if let Some(issue) = errors.first() {
                    self.focus = Some(Focus::Field(issue.field));
                }
                Err(SubmitBlocked::Invalid(errors))
            }
        }
    }

    /// Apply the transport's answer to an in-flight submission
    pub fn finish_submit(&mut self, result: &SubmissionResult) {
        if !self.is_submitting() {
            tracing::warn!("submission result arrived with no submission in flight");
            return;
        }

        if result.success {
            self.input = ContactFormInput::default();
            self.errors = FieldErrors::default();
            self.attempted = false;
            self.status = FormStatus::Succeeded;
            self.focus = Some(Focus::Field(Field::Name));
        } else {
            self.status = FormStatus::Failed {
                message: result.error_message().to_string(),
            };
        }
    }
}
