//! Files feature module
//!
//! Serves output artifacts referenced by job rows from local storage.

pub mod queries;
pub mod routes;

pub use routes::files_routes;
