//! Wire shapes exchanged with the registry API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::User;

/// Successful `POST /users` body.
#[derive(Debug, Deserialize)]
pub(super) struct RegisteredUserDto {
    pub user: User,
}

/// `DELETE /users/{id}` request body.
#[derive(Debug, Serialize)]
pub(super) struct DeleteUserDto<'a> {
    pub password: &'a str,
}

/// Error envelope returned on failure. Every key is optional so foreign or
/// truncated bodies still decode.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct ErrorEnvelopeDto {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<ErrorDetailsDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ErrorDetailsDto {
    pub fields: BTreeMap<String, String>,
    pub reason: Option<String>,
}

impl ErrorEnvelopeDto {
    /// Decode `body`, falling back to an empty envelope.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_validation_envelope() {
        let body = br#"{
            "code": "invalid_request",
            "message": "Validation failed",
            "traceId": "00000000-0000-0000-0000-000000000000",
            "details": { "fields": { "postalCode": "Code postal invalide" } }
        }"#;

        let envelope = ErrorEnvelopeDto::parse(body);

        assert!(envelope.has_code("invalid_request"));
        let details = envelope.details.expect("details present");
        assert_eq!(
            details.fields.get("postalCode").map(String::as_str),
            Some("Code postal invalide")
        );
    }

    #[test]
    fn details_without_fields_decode() {
        let envelope =
            ErrorEnvelopeDto::parse(br#"{"code":"invalid_request","details":{"reason":"not_adult"}}"#);

        let details = envelope.details.expect("details present");
        assert!(details.fields.is_empty());
        assert_eq!(details.reason.as_deref(), Some("not_adult"));
    }

    #[test]
    fn non_json_bodies_decode_as_empty() {
        let envelope = ErrorEnvelopeDto::parse(b"<html>Bad Gateway</html>");

        assert!(envelope.code.is_none());
        assert!(envelope.message.is_none());
    }
}
