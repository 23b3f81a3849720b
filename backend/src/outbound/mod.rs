//! Outbound adapters implementing the domain ports.
//!
//! - [`memory`] keeps users in process memory for development and tests.
//! - [`persistence`] stores users in PostgreSQL through Diesel.
//! - [`registry_api`] talks to a running registry over HTTP on behalf of
//!   client front ends.

pub mod memory;
pub mod persistence;
pub mod registry_api;
