//! Auth feature module
//!
//! A static identity check. It hands out an opaque token and the canonical
//! identity clients pass back as `user_id`; no route verifies the token.

pub mod commands;
pub mod routes;
pub mod store;

pub use routes::auth_routes;
pub use store::CredentialStore;
