//! User registry: registration form validation, age eligibility, and the
//! REST service that stores registered users.
//!
//! The crate follows a hexagonal layout:
//! - [`domain`] holds the validators, the eligibility gate, the form
//!   orchestrator, services, and the ports they depend on.
//! - [`inbound`] translates HTTP requests into domain calls.
//! - [`outbound`] implements the ports (in-memory and PostgreSQL stores, the
//!   HTTP client gateway).

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

#[cfg(test)]
pub(crate) mod test_support;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
