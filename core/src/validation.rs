//! Local field validation for person drafts.
//!
//! Each validator is a pure function of one field's value. Failures here
//! block submission before any request is built.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::notice::Locale;

pub const NAME_MAX_CHARS: usize = 120;
pub const EMAIL_MAX_CHARS: usize = 180;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Name, Field::Email];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("value is required")]
    Required,
    #[error("value is longer than {max} characters")]
    TooLong { max: usize },
    #[error("value is not a valid e-mail address")]
    InvalidFormat,
}

impl FieldError {
    pub fn message(&self, field: Field, locale: Locale) -> &'static str {
        match (locale, field, self) {
            (Locale::En, Field::Name, FieldError::Required) => "Full name is required",
            (Locale::En, Field::Name, FieldError::TooLong { .. }) => "Name cannot be longer than 120 characters",
            (Locale::En, Field::Email, FieldError::Required) => "E-mail is required",
            (Locale::En, Field::Email, FieldError::TooLong { .. }) => "E-mail cannot be longer than 180 characters",
            (Locale::En, _, FieldError::InvalidFormat) => "Invalid e-mail",
            (Locale::PtBr, Field::Name, FieldError::Required) => "Nome completo é obrigatório",
            (Locale::PtBr, Field::Name, FieldError::TooLong { .. }) => "Nome não pode ter mais de 120 caracteres",
            (Locale::PtBr, Field::Email, FieldError::Required) => "E-mail é obrigatório",
            (Locale::PtBr, Field::Email, FieldError::TooLong { .. }) => {
                "E-mail não pode ter mais de 180 caracteres"
            }
            (Locale::PtBr, _, FieldError::InvalidFormat) => "E-mail inválido",
        }
    }
}

/// The editable fields of a person, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: String,
    pub email: String,
}

impl PersonDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
        }
    }
}

/// Per-field outcome of validating a whole draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<FieldError>,
    pub email: Option<FieldError>,
}

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
        }
    }

    pub fn set(&mut self, field: Field, error: Option<FieldError>) {
        match field {
            Field::Name => self.name = error,
            Field::Email => self.email = error,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    match field {
        Field::Name => validate_name(value),
        Field::Email => validate_email(value),
    }
}

pub fn validate_name(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }
    if value.chars().count() > NAME_MAX_CHARS {
        return Err(FieldError::TooLong { max: NAME_MAX_CHARS });
    }
    Ok(())
}

/// Required first, then shape, then length.
pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }
    if !EMAIL_SHAPE.is_match(value) {
        return Err(FieldError::InvalidFormat);
    }
    if value.chars().count() > EMAIL_MAX_CHARS {
        return Err(FieldError::TooLong { max: EMAIL_MAX_CHARS });
    }
    Ok(())
}

pub fn validate_form(draft: &PersonDraft) -> FormErrors {
    FormErrors {
        name: validate_name(&draft.name).err(),
        email: validate_email(&draft.email).err(),
    }
}
