//! Users API handlers.
//!
//! ```text
//! GET    /users
//! POST   /users      {"firstname":"Jean","lastname":"Dupont",...}
//! DELETE /users/{id} {"password":"..."}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, RegistrationDraft, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_user_id};

/// Request body for `POST /users`.
///
/// Missing keys decode as empty strings and fail validation as required
/// fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterUserRequestBody {
    #[schema(example = "Jean")]
    pub firstname: String,
    #[schema(example = "Dupont")]
    pub lastname: String,
    #[schema(example = "jean.dupont@example.com")]
    pub email: String,
    #[schema(format = "date", example = "1990-01-01")]
    pub date_birth: String,
    #[schema(example = "75000")]
    pub postal_code: String,
    #[schema(example = "Paris")]
    pub city: String,
}

impl From<RegisterUserRequestBody> for RegistrationDraft {
    fn from(value: RegisterUserRequestBody) -> Self {
        Self {
            firstname: value.firstname,
            lastname: value.lastname,
            email: value.email,
            date_birth: value.date_birth,
            postal_code: value.postal_code,
            city: value.city,
        }
    }
}

/// Response body for a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserResponseBody {
    #[schema(value_type = UserSchema)]
    pub user: User,
    pub success: bool,
}

/// Request body for `DELETE /users/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct DeleteUserRequestBody {
    /// Shared admin password.
    pub password: Option<String>,
}

/// Response body for `DELETE /users/{id}`.
///
/// A wrong password yields `success: false` alongside the usual error
/// envelope fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserResponseBody {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "unauthorized")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Wrong password")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl DeleteUserResponseBody {
    fn deleted() -> Self {
        Self {
            success: true,
            code: None,
            message: None,
            trace_id: None,
        }
    }

    fn refused(error: &Error) -> Self {
        Self {
            success: false,
            code: Some(error.code()),
            message: Some(error.message().to_owned()),
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

/// List every registered user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Registered users", body = [UserSchema]),
        (status = 500, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Register a user after server-side validation and the age gate.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserRequestBody,
    responses(
        (status = 201, description = "User registered", body = RegisterUserResponseBody),
        (status = 400, description = "Invalid fields or applicant under age", body = ErrorSchema),
        (status = 500, description = "Duplicate email or record store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequestBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .register(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(RegisterUserResponseBody {
        user,
        success: true,
    }))
}

/// Delete a user, authorised by the shared admin password.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    request_body = DeleteUserRequestBody,
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponseBody),
        (status = 400, description = "Missing password or malformed id", body = ErrorSchema),
        (status = 401, description = "Wrong password", body = DeleteUserResponseBody),
        (status = 500, description = "Unknown user or record store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Option<web::Json<DeleteUserRequestBody>>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner(), "id")?;
    let password = payload
        .and_then(|body| body.into_inner().password)
        .ok_or_else(|| missing_field_error("password"))?;

    match state.users_command.delete_user(&id, &password).await {
        Ok(()) => Ok(HttpResponse::Ok().json(DeleteUserResponseBody::deleted())),
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            debug!(user_id = %id, "delete refused");
            Ok(HttpResponse::Unauthorized().json(DeleteUserResponseBody::refused(&err)))
        }
        Err(err) => Err(err),
    }
}
