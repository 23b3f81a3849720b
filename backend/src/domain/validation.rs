//! Field validators for the registration form.
//!
//! Each validator checks one raw input string. Emptiness is judged on the
//! trimmed value and reported ahead of any pattern check; the input itself is
//! never modified. [`validation_message`] exposes the string contract used by
//! form views: an empty string means the value is valid.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Registration form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Firstname,
    Lastname,
    Email,
    DateBirth,
    PostalCode,
    City,
}

impl Field {
    /// Every field, in display order.
    pub const ALL: [Field; 6] = [
        Field::Firstname,
        Field::Lastname,
        Field::Email,
        Field::DateBirth,
        Field::PostalCode,
        Field::City,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Firstname => "firstname",
            Self::Lastname => "lastname",
            Self::Email => "email",
            Self::DateBirth => "dateBirth",
            Self::PostalCode => "postalCode",
            Self::City => "city",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no registration field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

/// Language used for user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    Fr,
    En,
}

/// Why a single field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    /// Empty or whitespace-only input.
    Required,
    /// Name or city containing digits or symbols.
    InvalidCharacters,
    InvalidEmail,
    InvalidPostalCode,
    /// Birth date that is not a real calendar date.
    InvalidDate,
    /// Birth date after today.
    FutureDate,
}

impl FieldError {
    /// Localized message for display next to the field.
    pub fn message(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Required, Locale::Fr) => "Champ obligatoire.",
            (Self::Required, Locale::En) => "This field is required.",
            (Self::InvalidCharacters, Locale::Fr) => {
                "Les caractères spéciaux et chiffres ne sont pas autorisés."
            }
            (Self::InvalidCharacters, Locale::En) => {
                "Special characters and digits are not allowed."
            }
            (Self::InvalidEmail, Locale::Fr) => "L'email est invalide.",
            (Self::InvalidEmail, Locale::En) => "The email is invalid.",
            (Self::InvalidPostalCode, Locale::Fr) => {
                "Le code postal doit être composé de 5 chiffres."
            }
            (Self::InvalidPostalCode, Locale::En) => "The postal code must be 5 digits.",
            (Self::InvalidDate, Locale::Fr) => "La date de naissance est invalide.",
            (Self::InvalidDate, Locale::En) => "The birth date is invalid.",
            (Self::FutureDate, Locale::Fr) => {
                "La date de naissance ne peut pas être dans le futur."
            }
            (Self::FutureDate, Locale::En) => "The birth date cannot be in the future.",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message(Locale::default()))
    }
}

impl std::error::Error for FieldError {}

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static POSTAL_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|error| panic!("validator regex failed to compile: {error}"))
}

fn name_regex() -> &'static Regex {
    // Letters in any script, combining marks, apostrophes, spaces, hyphens.
    NAME_RE.get_or_init(|| compile(r"^[\p{L}\p{M}'’ -]+$"))
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"))
}

fn postal_code_regex() -> &'static Regex {
    POSTAL_CODE_RE.get_or_init(|| compile(r"^[0-9]{5}$"))
}

fn require(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

fn validate_letters(value: &str) -> Result<(), FieldError> {
    require(value)?;
    if name_regex().is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidCharacters)
    }
}

/// Validate a first name.
///
/// ```
/// use user_registry::domain::validation::{validate_firstname, FieldError};
///
/// assert!(validate_firstname("Jean-Loïc").is_ok());
/// assert_eq!(validate_firstname("R2D2"), Err(FieldError::InvalidCharacters));
/// assert_eq!(validate_firstname("   "), Err(FieldError::Required));
/// ```
pub fn validate_firstname(value: &str) -> Result<(), FieldError> {
    validate_letters(value)
}

/// Validate a last name. Same character set as [`validate_firstname`].
pub fn validate_lastname(value: &str) -> Result<(), FieldError> {
    validate_letters(value)
}

/// Validate a city name. Same character set as the name validators.
pub fn validate_city(value: &str) -> Result<(), FieldError> {
    validate_letters(value)
}

/// Validate an email address against the `local@domain.tld` shape.
///
/// The pattern runs on the raw value, so surrounding whitespace is rejected.
pub fn validate_email(value: &str) -> Result<(), FieldError> {
    require(value)?;
    if email_regex().is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

/// Validate a postal code: exactly five ASCII digits once trimmed.
pub fn validate_postal_code(value: &str) -> Result<(), FieldError> {
    require(value)?;
    if postal_code_regex().is_match(value.trim()) {
        Ok(())
    } else {
        Err(FieldError::InvalidPostalCode)
    }
}

/// Parse a birth date.
///
/// `YYYY-MM-DD` is the canonical form. RFC 3339 timestamps are accepted too
/// and reduced to their calendar date as written, ignoring the offset.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|instant| instant.date_naive())
        })
}

/// Validate a birth date relative to `today`.
pub fn validate_date_birth(value: &str, today: NaiveDate) -> Result<(), FieldError> {
    require(value)?;
    let date = parse_birth_date(value).ok_or(FieldError::InvalidDate)?;
    if date > today {
        return Err(FieldError::FutureDate);
    }
    Ok(())
}

/// Run the validator that belongs to `field`.
pub fn validate_field(field: Field, value: &str, today: NaiveDate) -> Result<(), FieldError> {
    match field {
        Field::Firstname => validate_firstname(value),
        Field::Lastname => validate_lastname(value),
        Field::Email => validate_email(value),
        Field::DateBirth => validate_date_birth(value, today),
        Field::PostalCode => validate_postal_code(value),
        Field::City => validate_city(value),
    }
}

/// Message for display under `field`; empty when the value is valid.
///
/// ```
/// use chrono::NaiveDate;
/// use user_registry::domain::validation::{validation_message, Field, Locale};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
/// assert_eq!(validation_message(Field::PostalCode, "75000", today, Locale::Fr), "");
/// assert_eq!(
///     validation_message(Field::PostalCode, "0600", today, Locale::En),
///     "The postal code must be 5 digits."
/// );
/// ```
pub fn validation_message(field: Field, value: &str, today: NaiveDate, locale: Locale) -> String {
    match validate_field(field, value, today) {
        Ok(()) => String::new(),
        Err(err) => err.message(locale).to_owned(),
    }
}
