//! In-process user store.

mod user_store;

pub use user_store::InMemoryUserStore;
