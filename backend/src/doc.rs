//! OpenAPI document for the registry API.
//!
//! Domain types are described through the wrappers in
//! [`crate::inbound::http::schemas`]. The document backs Swagger UI in debug
//! builds and is printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::users::{
    DeleteUserRequestBody, DeleteUserResponseBody, RegisterUserRequestBody,
    RegisterUserResponseBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "Registration, listing, and password-guarded deletion of users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        RegisterUserRequestBody,
        RegisterUserResponseBody,
        DeleteUserRequestBody,
        DeleteUserResponseBody,
    )),
    tags(
        (name = "users", description = "Registered users"),
        (name = "health", description = "Readiness and liveness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/users")]
    #[case("/users/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn users_collection_supports_list_and_register() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users").expect("users path");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
        let item = doc.paths.paths.get("/users/{id}").expect("user path");
        assert!(item.delete.is_some());
    }

    #[rstest]
    #[case("id")]
    #[case("dateBirth")]
    #[case("postalCode")]
    fn user_schema_uses_camel_case_keys(#[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("User").expect("User schema");
        assert!(object_has_field(user, field), "User lacks {field}");
    }

    #[test]
    fn error_schema_carries_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");
        for field in ["code", "message", "traceId", "details"] {
            assert!(object_has_field(error, field), "Error lacks {field}");
        }
    }
}
