//! Jobview Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the jobview workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`JobviewError`] and the [`Result`] alias
//! - **Logging**: tracing subscriber setup shared by the server and the ingest tool
//!
//! # Example
//!
//! ```no_run
//! use jobview_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{JobviewError, Result};
