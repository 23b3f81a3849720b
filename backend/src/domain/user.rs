//! Registered user data model.
//!
//! Text fields are validated newtypes. Values are checked with the field
//! validators first and stored trimmed; email addresses are also lowercased so
//! uniqueness is case-insensitive.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    Field, FieldError, parse_birth_date, validate_city, validate_email, validate_firstname,
    validate_postal_code,
};

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("{field}: {error}")]
    InvalidField { field: Field, error: FieldError },
}

impl UserValidationError {
    fn field(field: Field) -> impl FnOnce(FieldError) -> Self {
        move |error| Self::InvalidField { field, error }
    }
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its hyphenated UUID form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

macro_rules! validated_text {
    ($(#[$meta:meta])* $name:ident, $field:expr, $validate:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate `value` and keep its trimmed form.
            pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
                Self::for_field($field, value)
            }

            /// As [`Self::new`], reporting failures against `field`.
            pub fn for_field(
                field: Field,
                value: impl Into<String>,
            ) -> Result<Self, UserValidationError> {
                let value = value.into();
                $validate(&value).map_err(UserValidationError::field(field))?;
                Ok(Self(value.trim().to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = UserValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

validated_text!(
    /// First or last name: letters, hyphens, apostrophes, and spaces.
    PersonName,
    Field::Firstname,
    validate_firstname
);
validated_text!(
    /// Five-digit postal code.
    PostalCode,
    Field::PostalCode,
    validate_postal_code
);
validated_text!(
    /// City name, same character set as [`PersonName`].
    CityName,
    Field::City,
    validate_city
);

/// Email address, trimmed and lowercased.
///
/// # Examples
/// ```
/// use user_registry::domain::EmailAddress;
///
/// let email = EmailAddress::new("Ada@Example.COM").expect("valid email");
/// assert_eq!(email.as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        validate_email(&value).map_err(UserValidationError::field(Field::Email))?;
        Ok(Self(value.trim().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated registration payload, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    firstname: PersonName,
    lastname: PersonName,
    email: EmailAddress,
    date_birth: NaiveDate,
    postal_code: PostalCode,
    city: CityName,
}

impl NewUser {
    pub fn new(
        firstname: PersonName,
        lastname: PersonName,
        email: EmailAddress,
        date_birth: NaiveDate,
        postal_code: PostalCode,
        city: CityName,
    ) -> Self {
        Self {
            firstname,
            lastname,
            email,
            date_birth,
            postal_code,
            city,
        }
    }

    pub fn firstname(&self) -> &PersonName {
        &self.firstname
    }

    pub fn lastname(&self) -> &PersonName {
        &self.lastname
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn date_birth(&self) -> NaiveDate {
        self.date_birth
    }

    pub fn postal_code(&self) -> &PostalCode {
        &self.postal_code
    }

    pub fn city(&self) -> &CityName {
        &self.city
    }
}

/// Registered user.
///
/// ## Invariants
/// - `id` never changes once assigned by the store.
/// - `email` is lowercased and unique across the store.
///
/// JSON uses camelCase keys and `YYYY-MM-DD` birth dates. Decoding also
/// accepts `_id` for the identifier and RFC 3339 birth timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    firstname: PersonName,
    lastname: PersonName,
    email: EmailAddress,
    date_birth: NaiveDate,
    postal_code: PostalCode,
    city: CityName,
}

impl User {
    pub fn new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            firstname,
            lastname,
            email,
            date_birth,
            postal_code,
            city,
        } = new_user;
        Self {
            id,
            firstname,
            lastname,
            email,
            date_birth,
            postal_code,
            city,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn firstname(&self) -> &PersonName {
        &self.firstname
    }

    pub fn lastname(&self) -> &PersonName {
        &self.lastname
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn date_birth(&self) -> NaiveDate {
        self.date_birth
    }

    pub fn postal_code(&self) -> &PostalCode {
        &self.postal_code
    }

    pub fn city(&self) -> &CityName {
        &self.city
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    #[serde(alias = "_id")]
    id: String,
    firstname: String,
    lastname: String,
    email: String,
    date_birth: String,
    postal_code: String,
    city: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            firstname: value.firstname.into(),
            lastname: value.lastname.into(),
            email: value.email.into(),
            date_birth: value.date_birth.format("%Y-%m-%d").to_string(),
            postal_code: value.postal_code.into(),
            city: value.city.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let date_birth = parse_birth_date(&value.date_birth).ok_or(
            UserValidationError::InvalidField {
                field: Field::DateBirth,
                error: FieldError::InvalidDate,
            },
        )?;
        let new_user = NewUser::new(
            PersonName::new(value.firstname)?,
            PersonName::for_field(Field::Lastname, value.lastname)?,
            EmailAddress::new(value.email)?,
            date_birth,
            PostalCode::new(value.postal_code)?,
            CityName::new(value.city)?,
        );
        Ok(User::new(UserId::new(value.id)?, new_user))
    }
}

#[cfg(test)]
mod tests;
