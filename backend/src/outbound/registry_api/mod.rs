//! HTTP client adapter for a running user registry.
//!
//! Implements the [`UserGateway`](crate::domain::ports::UserGateway) port so
//! the form orchestrator and the user directory can run against the REST API.

mod dto;
mod http_gateway;

pub use http_gateway::HttpUserGateway;
