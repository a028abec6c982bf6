//! Feature modules implementing the jobview API
//!
//! # Features
//!
//! - **jobs**: job listing over the ingested table
//! - **files**: output artifact downloads from local storage
//! - **auth**: static credential check
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Operations with side effects (login issues a token)
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions

pub mod auth;
pub mod files;
pub mod jobs;

use axum::Router;
use std::sync::Arc;

use crate::storage::Storage;
use auth::CredentialStore;
use jobs::JobCatalog;

/// Shared state for all feature routes
///
/// Everything in here is immutable after startup; clones share it.
#[derive(Debug, Clone)]
pub struct FeatureState {
    /// Job table ingested at startup
    pub catalog: JobCatalog,
    /// Output artifact directory
    pub storage: Storage,
    /// Static login credentials
    pub credentials: Arc<CredentialStore>,
}

/// Creates the router with all feature routes mounted at the root:
/// - `/jobs` - Job listing
/// - `/download/:filename` - Artifact download
/// - `/login` - Credential check
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .merge(jobs::jobs_routes().with_state(state.catalog))
        .merge(files::files_routes().with_state(state.storage))
        .merge(auth::auth_routes().with_state(state.credentials))
}
