//! Print the OpenAPI document as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;

use user_registry::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|error| io::Error::other(format!("serialise OpenAPI document: {error}")))?;
    println!("{json}");
    Ok(())
}
