//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::web;

use crate::domain::Error;

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor configuration that reports malformed bodies with the
/// shared error envelope instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed JSON body: {err}")).into()
    })
}
