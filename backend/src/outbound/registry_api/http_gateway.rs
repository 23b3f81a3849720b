//! Reqwest-backed [`UserGateway`].
//!
//! Owns transport details only: URL building, timeouts, and mapping HTTP
//! statuses and error envelopes onto [`GatewayError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{DeleteUserDto, ErrorEnvelopeDto, RegisteredUserDto};
use crate::domain::ports::{GatewayError, UserGateway};
use crate::domain::{RegistrationDraft, User, UserId};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway that calls the registry REST API rooted at `base_url`.
pub struct HttpUserGateway {
    client: Client,
    base_url: Url,
}

/// What the failed request was about, for error messages.
enum Subject<'a> {
    Listing,
    Registration(&'a RegistrationDraft),
    Deletion(&'a UserId),
}

impl HttpUserGateway {
    /// Build a gateway with the default 10 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                GatewayError::unavailable(format!("invalid registry base URL: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl UserGateway for HttpUserGateway {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(&["users"])?)
            .send()
            .await
            .map_err(map_transport_error)?;
        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body, Subject::Listing));
        }
        decode(&body)
    }

    async fn create_user(&self, draft: &RegistrationDraft) -> Result<User, GatewayError> {
        let response = self
            .client
            .post(self.endpoint(&["users"])?)
            .json(draft)
            .send()
            .await
            .map_err(map_transport_error)?;
        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body, Subject::Registration(draft)));
        }
        let created: RegisteredUserDto = decode(&body)?;
        debug!(user_id = %created.user.id(), "user registered remotely");
        Ok(created.user)
    }

    async fn delete_user(&self, id: &UserId, password: &str) -> Result<(), GatewayError> {
        let id_segment = id.to_string();
        let response = self
            .client
            .delete(self.endpoint(&["users", &id_segment])?)
            .json(&DeleteUserDto { password })
            .send()
            .await
            .map_err(map_transport_error)?;
        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body, Subject::Deletion(id)));
        }
        Ok(())
    }
}

async fn read_body(response: reqwest::Response) -> Result<(StatusCode, Vec<u8>), GatewayError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    Ok((status, body.to_vec()))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|err| {
        GatewayError::unavailable(format!(
            "unexpected registry response: {err}: {}",
            body_preview(body)
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::unavailable(format!("registry request timed out: {error}"))
    } else {
        GatewayError::unavailable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8], subject: Subject<'_>) -> GatewayError {
    let envelope = ErrorEnvelopeDto::parse(body);
    debug!(
        status = status.as_u16(),
        code = envelope.code.as_deref(),
        reason = envelope
            .details
            .as_ref()
            .and_then(|details| details.reason.as_deref()),
        "registry request failed"
    );

    match (status, subject) {
        (StatusCode::UNAUTHORIZED, _) => GatewayError::wrong_password(),
        (StatusCode::BAD_REQUEST, _) => {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("status {}", status.as_u16()));
            let fields = envelope
                .details
                .map(|details| details.fields)
                .unwrap_or_default();
            GatewayError::validation_failed(message, fields)
        }
        (_, Subject::Registration(draft)) if envelope.has_code("duplicate_email") => {
            GatewayError::duplicate_email(draft.email.trim().to_lowercase())
        }
        (_, Subject::Deletion(id)) if envelope.has_code("user_not_found") => {
            GatewayError::not_found(id.to_string())
        }
        (_, Subject::Listing | Subject::Registration(_) | Subject::Deletion(_)) => {
            let preview = envelope.message.unwrap_or_else(|| body_preview(body));
            if preview.is_empty() {
                GatewayError::unavailable(format!("status {}", status.as_u16()))
            } else {
                GatewayError::unavailable(format!("status {}: {preview}", status.as_u16()))
            }
        }
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
