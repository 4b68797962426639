//! Contact form validation
//!
//! `validate()` checks every field independently and reports all problems at
//! once. The same rules gate the terminal form and the `/api/contact`
//! endpoint, so a request the form accepts is never rejected by the server.

pub mod form;
pub mod transport;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

/// local@domain.tld, with dot-separated atoms on both sides
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("email pattern is a valid regex")
});

/// Raw form contents, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your Name",
            Field::Email => "Your Email",
            Field::Message => "Message",
        }
    }
}

/// Why a single field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    TooShort { min: usize },
    InvalidFormat,
}

/// A field error with the field it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: Field,
    pub error: FieldError,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error {
            FieldError::TooShort { min } => write!(
                f,
                "{} must be at least {} characters",
                self.field.label(),
                min
            ),
            FieldError::InvalidFormat => {
                write!(f, "Invalid {} address", self.field.label().to_lowercase())
            }
        }
    }
}

/// All problems found in one validation pass, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    issues: Vec<FieldIssue>,
}

impl FieldErrors {
    fn push(&mut self, field: Field, error: FieldError) {
        self.issues.push(FieldIssue { field, error });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldIssue> {
        self.issues.iter().copied().find(|i| i.field == field)
    }

    pub fn first(&self) -> Option<FieldIssue> {
        self.issues.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldIssue> {
        self.issues.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Input that passed validation, trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub message: String,
}

fn check_min_chars(errors: &mut FieldErrors, field: Field, value: &str, min: usize) {
    if value.chars().count() < min {
        errors.push(field, FieldError::TooShort { min });
    }
}

fn check_email(errors: &mut FieldErrors, value: &str) {
    if !EMAIL_PATTERN.is_match(value) {
        errors.push(Field::Email, FieldError::InvalidFormat);
    }
}

/// Validate the form; name is required
pub fn validate(input: &ContactFormInput) -> Result<ValidContact, FieldErrors> {
    validate_parts(Some(&input.name), &input.email, &input.message)
}

/// Validate a wire request; name may be absent but not too short
pub fn validate_request(
    name: Option<&str>,
    email: &str,
    message: &str,
) -> Result<ValidContact, FieldErrors> {
    validate_parts(name, email, message)
}

fn validate_parts(
    name: Option<&str>,
    email: &str,
    message: &str,
) -> Result<ValidContact, FieldErrors> {
    let name = name.map(str::trim);
    let email = email.trim();
    let message = message.trim();

    let mut errors = FieldErrors::default();
    if let Some(name) = name {
        check_min_chars(&mut errors, Field::Name, name, NAME_MIN_CHARS);
    }
    check_email(&mut errors, email);
    check_min_chars(&mut errors, Field::Message, message, MESSAGE_MIN_CHARS);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidContact {
        name: name.map(str::to_string),
        email: email.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, message: &str) -> ContactFormInput {
        ContactFormInput {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn collects_every_field_error() {
        let errors = validate(&input("A", "bad", "short")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.get(Field::Name).unwrap().error,
            FieldError::TooShort { min: 2 }
        );
        assert_eq!(
            errors.get(Field::Email).unwrap().error,
            FieldError::InvalidFormat
        );
        assert_eq!(
            errors.get(Field::Message).unwrap().error,
            FieldError::TooShort { min: 10 }
        );
        assert_eq!(errors.first().unwrap().field, Field::Name);
    }

    #[test]
    fn messages_read_naturally() {
        let errors = validate(&input("A", "bad", "short")).unwrap_err();
        let messages: Vec<String> = errors.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Name must be at least 2 characters",
                "Invalid email address",
                "Message must be at least 10 characters",
            ]
        );
    }

    #[test]
    fn valid_record_is_trimmed() {
        let valid = validate(&input(
            "  Ada ",
            " ada@example.com ",
            "  I would like a demo.  ",
        ))
        .unwrap();
        assert_eq!(valid.name.as_deref(), Some("Ada"));
        assert_eq!(valid.email, "ada@example.com");
        assert_eq!(valid.message, "I would like a demo.");
    }

    #[test]
    fn boundary_lengths() {
        assert!(validate(&input("Al", "a@b.co", "0123456789")).is_ok());
        let errors = validate(&input("A ", "a@b.co", "012345678 ")).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Two chars, four bytes
        assert!(validate(&input("Ğü", "a@b.co", "ünïcödé tëxt")).is_ok());
        let errors = validate(&input("Ğ", "a@b.co", "ééééé")).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn email_shapes() {
        for good in [
            "research@neurobotix.technologies",
            "first.last+tag@mail.example.co.uk",
            "o'neil@example.ie",
        ] {
            assert!(EMAIL_PATTERN.is_match(good), "{good} should be valid");
        }
        for bad in [
            "",
            "plain",
            "@example.com",
            "a@",
            "a@example",
            "a@@example.com",
            "a b@example.com",
            "a@-example.com",
            "a..b@example.com",
            "a@example.c",
        ] {
            assert!(!EMAIL_PATTERN.is_match(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn request_without_name_is_accepted() {
        let valid = validate_request(None, "a@b.co", "Tell me more please").unwrap();
        assert_eq!(valid.name, None);

        let errors = validate_request(Some("x"), "a@b.co", "Tell me more please").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().field, Field::Name);
    }
}
