//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. These wrappers mirror their JSON
//! shape so the document can describe them without pulling utoipa into the
//! domain layer.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed request or failed field validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Wrong shared admin password.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The email address is already registered.
    #[schema(rename = "duplicate_email")]
    DuplicateEmail,
    /// No user carries the requested identifier.
    #[schema(rename = "user_not_found")]
    UserNotFound,
    /// The record store failed.
    #[schema(rename = "store_unavailable")]
    StoreUnavailable,
    /// Unexpected server error; the message is redacted.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Validation failed")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "00000000-0000-0000-0000-000000000000")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `{"fields": {"email": "The email is invalid."}}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(format = "uuid", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Jean")]
    firstname: String,
    #[schema(example = "Dupont")]
    lastname: String,
    /// Lowercased, unique across users.
    #[schema(example = "jean.dupont@example.com")]
    email: String,
    #[schema(format = "date", example = "1990-01-01")]
    date_birth: String,
    #[schema(example = "75000")]
    postal_code: String,
    #[schema(example = "Paris")]
    city: String,
}
