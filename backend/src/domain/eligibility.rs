//! Age eligibility gate.
//!
//! Age is counted in whole calendar years: the difference in year numbers,
//! less one while this year's birthday is still ahead. Registration requires
//! an age strictly above [`MINIMUM_AGE_EXCLUSIVE`], so someone whose 18th
//! birthday is today is still refused.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use mockable::Clock;
use serde_json::Value;

use super::validation::parse_birth_date;

/// Registration needs an age strictly greater than this.
pub const MINIMUM_AGE_EXCLUSIVE: u32 = 18;

/// Key read by [`calculate_age_from_value`].
pub const BIRTH_FIELD: &str = "birth";

/// Why an age could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    #[error("no birth date was supplied")]
    MissingInput,
    #[error("age input must be an object")]
    NotAnObject,
    #[error("age input has no `birth` field")]
    MissingBirthField,
    #[error("birth date is not a valid calendar date")]
    InvalidDate,
    #[error("birth date is in the future")]
    FutureDate,
}

/// Whole years elapsed between `birth` and `today`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use user_registry::domain::eligibility::calculate_age;
///
/// let birth = NaiveDate::from_ymd_opt(1990, 1, 1).expect("date");
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("date");
/// assert_eq!(calculate_age(birth, today), Ok(34));
/// ```
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> Result<u32, AgeError> {
    if birth > today {
        return Err(AgeError::FutureDate);
    }
    let years = today.year() - birth.year();
    let birthday_pending = (today.month(), today.day()) < (birth.month(), birth.day());
    let age = if birthday_pending { years - 1 } else { years };
    u32::try_from(age).map_err(|_| AgeError::FutureDate)
}

/// Parse `raw` as a birth date and compute the age on `today`.
pub fn calculate_age_from_str(raw: &str, today: NaiveDate) -> Result<u32, AgeError> {
    let birth = parse_birth_date(raw).ok_or(AgeError::InvalidDate)?;
    calculate_age(birth, today)
}

/// Compute an age from an untyped `{ "birth": "<date>" }` payload.
///
/// ```
/// use chrono::NaiveDate;
/// use serde_json::json;
/// use user_registry::domain::eligibility::{calculate_age_from_value, AgeError};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("date");
/// assert_eq!(calculate_age_from_value(None, today), Err(AgeError::MissingInput));
/// assert_eq!(
///     calculate_age_from_value(Some(&json!({ "birth": "2000-06-01" })), today),
///     Ok(24)
/// );
/// ```
pub fn calculate_age_from_value(input: Option<&Value>, today: NaiveDate) -> Result<u32, AgeError> {
    let object = match input {
        None | Some(Value::Null) => return Err(AgeError::MissingInput),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(AgeError::NotAnObject),
    };
    match object.get(BIRTH_FIELD) {
        None | Some(Value::Null) => Err(AgeError::MissingBirthField),
        Some(Value::String(raw)) => calculate_age_from_str(raw, today),
        Some(_) => Err(AgeError::InvalidDate),
    }
}

/// Whether `age` clears the registration threshold.
pub fn is_adult(age: u32) -> bool {
    age > MINIMUM_AGE_EXCLUSIVE
}

/// Eligibility check bound to a clock.
///
/// "Today" is the UTC calendar date of the clock's current instant.
#[derive(Clone)]
pub struct EligibilityGate {
    clock: Arc<dyn Clock>,
}

impl EligibilityGate {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// Age on today's date for a raw birth date string.
    pub fn age(&self, raw: &str) -> Result<u32, AgeError> {
        calculate_age_from_str(raw, self.today())
    }

    /// Whether a raw birth date belongs to someone old enough to register.
    pub fn is_eligible(&self, raw: &str) -> Result<bool, AgeError> {
        self.age(raw).map(is_adult)
    }
}

impl std::fmt::Debug for EligibilityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EligibilityGate")
            .field("today", &self.today())
            .finish()
    }
}

#[cfg(test)]
mod tests;
