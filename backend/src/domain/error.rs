//! Domain-level error payload.
//!
//! Transport agnostic: the HTTP adapter maps [`ErrorCode`] to a status code,
//! and the client gateway decodes the same JSON shape back into this type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed request or failed field validation.
    InvalidRequest,
    /// The shared admin password did not match.
    Unauthorized,
    /// Another user already holds the email address.
    DuplicateEmail,
    /// No user carries the requested identifier.
    UserNotFound,
    /// The record store could not be reached or rejected the query.
    StoreUnavailable,
    /// Anything else. Messages are redacted before leaving the process.
    InternalError,
}

impl ErrorCode {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::Unauthorized => "Unauthorized",
            Self::DuplicateEmail => "Email already registered",
            Self::UserNotFound => "User not found",
            Self::StoreUnavailable => "Record store unavailable",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Error payload returned to adapters.
///
/// ## Invariants
/// - `message` is never blank; blank input is replaced by the code's default.
/// - `trace_id` is captured from the task-local [`TraceId`] at construction.
///
/// # Examples
/// ```
/// use user_registry::domain::{Error, ErrorCode};
///
/// let err = Error::user_not_found("no such user");
/// assert_eq!(err.code(), ErrorCode::UserNotFound);
/// assert!(err.trace_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Build an error, picking up the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Attach structured details, such as per-field validation messages.
    ///
    /// ```
    /// use user_registry::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("Validation failed")
    ///     .with_details(json!({ "fields": { "email": "The email is invalid." } }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn duplicate_email(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateEmail, message)
    }

    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UserNotFound, message)
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
