//! Registration form state and submission orchestration.
//!
//! [`FormState`] is the explicit, caller-owned form: the draft values and the
//! per-field errors currently on display. [`RegistrationForm`] drives it
//! through field edits and submission, consulting the eligibility gate and
//! the remote [`UserGateway`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::eligibility::EligibilityGate;
use super::ports::{GatewayError, UserGateway};
use super::user::{CityName, EmailAddress, NewUser, PersonName, PostalCode, UserValidationError};
use super::validation::{Field, FieldError, Locale, parse_birth_date, validate_field};
use super::User;

/// Raw form values as typed by the user.
///
/// Missing keys decode as empty strings so they surface as required-field
/// errors rather than as malformed JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub date_birth: String,
    pub postal_code: String,
    pub city: String,
}

impl RegistrationDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Firstname => &self.firstname,
            Field::Lastname => &self.lastname,
            Field::Email => &self.email,
            Field::DateBirth => &self.date_birth,
            Field::PostalCode => &self.postal_code,
            Field::City => &self.city,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Firstname => &mut self.firstname,
            Field::Lastname => &mut self.lastname,
            Field::Email => &mut self.email,
            Field::DateBirth => &mut self.date_birth,
            Field::PostalCode => &mut self.postal_code,
            Field::City => &mut self.city,
        };
        *slot = value.into();
    }

    /// Run every field validator against `today`.
    pub fn field_errors(&self, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in Field::ALL {
            errors.record(field, validate_field(field, self.get(field), today));
        }
        errors
    }

    /// Validate every field and build the normalized payload.
    ///
    /// The age gate is not applied here.
    pub fn validate(&self, today: NaiveDate) -> Result<NewUser, FieldErrors> {
        let errors = self.field_errors(today);
        if !errors.is_empty() {
            return Err(errors);
        }
        self.build().map_err(FieldErrors::from)
    }

    fn build(&self) -> Result<NewUser, UserValidationError> {
        let date_birth = parse_birth_date(&self.date_birth).ok_or(UserValidationError::InvalidField {
            field: Field::DateBirth,
            error: FieldError::InvalidDate,
        })?;
        Ok(NewUser::new(
            PersonName::for_field(Field::Firstname, self.firstname.as_str())?,
            PersonName::for_field(Field::Lastname, self.lastname.as_str())?,
            EmailAddress::new(self.email.as_str())?,
            date_birth,
            PostalCode::new(self.postal_code.as_str())?,
            CityName::new(self.city.as_str())?,
        ))
    }
}

/// Errors currently attached to form fields. Absent means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    /// Store or clear the error for `field` from a validator result.
    pub fn record(&mut self, field: Field, result: Result<(), FieldError>) {
        match result {
            Ok(()) => {
                self.0.remove(&field);
            }
            Err(err) => {
                self.0.insert(field, err);
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    /// Message shown under `field`, empty when valid.
    pub fn message(&self, field: Field, locale: Locale) -> &'static str {
        self.get(field).map_or("", |err| err.message(locale))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, err)| (*field, *err))
    }

    /// Wire form: field name to localized message.
    pub fn to_messages(&self, locale: Locale) -> BTreeMap<String, String> {
        self.iter()
            .map(|(field, err)| (field.as_str().to_owned(), err.message(locale).to_owned()))
            .collect()
    }
}

impl From<UserValidationError> for FieldErrors {
    fn from(value: UserValidationError) -> Self {
        let mut errors = Self::default();
        match value {
            UserValidationError::InvalidField { field, error } => errors.record(field, Err(error)),
            UserValidationError::InvalidId => {}
        }
        errors
    }
}

/// Caller-owned form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: RegistrationDraft,
    errors: FieldErrors,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from prefilled values. No validation runs until the first edit
    /// or submission.
    pub fn with_draft(draft: RegistrationDraft) -> Self {
        Self {
            draft,
            errors: FieldErrors::default(),
        }
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Update one value and re-run that field's validator only.
    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>, today: NaiveDate) {
        self.draft.set(field, value);
        let result = validate_field(field, self.draft.get(field), today);
        self.errors.record(field, result);
    }

    /// Re-validate every field, touched or not. Returns whether all passed.
    pub fn validate_all(&mut self, today: NaiveDate) -> bool {
        self.errors = self.draft.field_errors(today);
        self.errors.is_empty()
    }

    /// Whether the submit control should be enabled: every field filled in
    /// and no error on display.
    pub fn can_submit(&self) -> bool {
        Field::ALL
            .iter()
            .all(|field| !self.draft.get(*field).trim().is_empty())
            && self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Why a submission was refused before reaching the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// Every field is valid but the applicant is not old enough.
    NotAdult,
    /// At least one field carries an error.
    InvalidFields,
}

/// Result of [`RegistrationForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Registered(User),
    Rejected(SubmitRejection),
    /// A submission from this form is already in flight.
    AlreadySubmitting,
    Failed(GatewayError),
}

impl SubmitOutcome {
    /// Notification text for this outcome.
    pub fn notification(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Registered(_), Locale::Fr) => "Inscription réussie !",
            (Self::Registered(_), Locale::En) => "Registration successful!",
            (Self::Rejected(SubmitRejection::NotAdult), Locale::Fr) => {
                "Vous devez être majeur pour vous inscrire."
            }
            (Self::Rejected(SubmitRejection::NotAdult), Locale::En) => {
                "You must be an adult to register."
            }
            (Self::Rejected(SubmitRejection::InvalidFields), Locale::Fr) => {
                "Veuillez remplir correctement les champs."
            }
            (Self::Rejected(SubmitRejection::InvalidFields), Locale::En) => {
                "Please fill in the fields correctly."
            }
            (Self::AlreadySubmitting, Locale::Fr) => "Inscription déjà en cours.",
            (Self::AlreadySubmitting, Locale::En) => "A registration is already in progress.",
            (Self::Failed(err), locale) => gateway_failure_message(err, locale),
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered(_))
    }
}

/// User-facing text for a gateway failure.
pub fn gateway_failure_message(err: &GatewayError, locale: Locale) -> &'static str {
    match (err, locale) {
        (GatewayError::DuplicateEmail { .. }, Locale::Fr) => "Cet email existe déjà.",
        (GatewayError::DuplicateEmail { .. }, Locale::En) => "This email is already registered.",
        (GatewayError::ValidationFailed { .. }, Locale::Fr) => {
            "Veuillez remplir correctement les champs."
        }
        (GatewayError::ValidationFailed { .. }, Locale::En) => {
            "Please fill in the fields correctly."
        }
        (GatewayError::WrongPassword, Locale::Fr) => "Mot de passe incorrect.",
        (GatewayError::WrongPassword, Locale::En) => "Wrong password.",
        (GatewayError::NotFound { .. }, Locale::Fr) => "Utilisateur introuvable.",
        (GatewayError::NotFound { .. }, Locale::En) => "User not found.",
        (GatewayError::Unavailable { .. }, Locale::Fr) => {
            "Le service est indisponible, veuillez réessayer plus tard."
        }
        (GatewayError::Unavailable { .. }, Locale::En) => {
            "The service is unavailable, please try again later."
        }
    }
}

/// Releases the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives a [`FormState`] through edits and submission.
///
/// At most one create request is outstanding per form. A submission that
/// arrives while another is in flight returns
/// [`SubmitOutcome::AlreadySubmitting`] without touching the gateway.
pub struct RegistrationForm {
    gateway: Arc<dyn UserGateway>,
    gate: EligibilityGate,
    in_flight: AtomicBool,
}

impl RegistrationForm {
    pub fn new(gateway: Arc<dyn UserGateway>, gate: EligibilityGate) -> Self {
        Self {
            gateway,
            gate,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Apply one field edit using the gate's notion of today.
    pub fn change_field(&self, state: &mut FormState, field: Field, value: impl Into<String>) {
        state.on_field_change(field, value, self.gate.today());
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate everything, apply the age gate, and create the user.
    ///
    /// On success the state is reset. On any failure the draft is kept and
    /// per-field errors stay populated.
    pub async fn submit(&self, state: &mut FormState) -> SubmitOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("submission ignored: another one is in flight");
            return SubmitOutcome::AlreadySubmitting;
        };

        if !state.validate_all(self.gate.today()) {
            debug!(invalid_fields = state.errors().len(), "submission blocked by field errors");
            return SubmitOutcome::Rejected(SubmitRejection::InvalidFields);
        }

        match self.gate.is_eligible(&state.draft().date_birth) {
            Ok(true) => {}
            Ok(false) | Err(_) => {
                debug!("submission blocked by the age gate");
                return SubmitOutcome::Rejected(SubmitRejection::NotAdult);
            }
        }

        match self.gateway.create_user(state.draft()).await {
            Ok(user) => {
                info!(user_id = %user.id(), "registration submitted");
                state.reset();
                SubmitOutcome::Registered(user)
            }
            Err(err) => {
                warn!(error = %err, "registration failed");
                SubmitOutcome::Failed(err)
            }
        }
    }
}
