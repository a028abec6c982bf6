//! Jobview Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Read-only HTTP view over a job-execution log kept in a spreadsheet.
//!
//! # Overview
//!
//! - **Jobs** (`GET /jobs`): list jobs submitted by a requester, or all jobs
//! - **Downloads** (`GET /download/:filename`): stream an output artifact
//! - **Login** (`POST /login`): check an identity against static credentials
//!
//! # Architecture
//!
//! The workbook is ingested once, before the listener binds, by
//! [`jobview_ingest`]. The resulting [`jobview_ingest::LoadOutcome`] is moved
//! into a [`features::jobs::JobCatalog`] behind an `Arc` and only ever read
//! afterwards, so request handlers share it without locks. A broken workbook
//! does not stop the server: it starts with an empty table, `/jobs` answers
//! `500 DATA_UNAVAILABLE`, and `/health` reports the failure reason.
//!
//! Each feature is a vertical slice (`queries/`, `commands/`, `routes.rs`).
//!
//! # Example
//!
//! ```no_run
//! use jobview_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod storage;

// Re-export commonly used types
pub use error::{ApiResult, AppError};
