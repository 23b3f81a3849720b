//! Request validation helpers shared by HTTP handlers.

use serde_json::json;

use crate::domain::{Error, UserId};

/// Stable detail codes for request-shape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DetailCode {
    MissingField,
    InvalidUuid,
}

impl DetailCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
        }
    }
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": DetailCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: &str, value: &str) -> Error {
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": DetailCode::InvalidUuid.as_str(),
    }))
}

/// Parse a path segment into a [`UserId`].
pub(crate) fn parse_user_id(value: &str, field: &str) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| invalid_uuid_error(field, value))
}
