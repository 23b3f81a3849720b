//! Domain types, rules, and services.
//!
//! Public surface:
//! - `validation`: field validators and localized messages.
//! - `eligibility`: age computation and the registration age gate.
//! - `registration_form`: caller-owned form state and the submit orchestrator.
//! - `user_directory`: list view with password-gated deletion.
//! - `UserRegistryService`: server-side use cases over a `UserStore`.
//! - `Error` / `ErrorCode`: transport-agnostic error envelope.

pub mod eligibility;
pub mod error;
pub mod ports;
pub mod registration_form;
pub mod shared_secret;
pub mod trace_id;
pub mod user;
pub mod user_directory;
pub mod user_registry_service;
pub mod validation;

pub use self::eligibility::{AgeError, EligibilityGate};
pub use self::error::{Error, ErrorCode};
pub use self::registration_form::{
    FieldErrors, FormState, RegistrationDraft, RegistrationForm, SubmitOutcome, SubmitRejection,
};
pub use self::shared_secret::{EmptySecret, SharedSecret};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    CityName, EmailAddress, NewUser, PersonName, PostalCode, User, UserId, UserValidationError,
};
pub use self::user_directory::{DeleteOutcome, UserDirectory};
pub use self::user_registry_service::UserRegistryService;
pub use self::validation::{Field, FieldError, Locale};
