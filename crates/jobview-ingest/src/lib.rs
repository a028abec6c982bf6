//! Jobview Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Turns a job-log workbook into one normalized, immutable [`JobTable`].
//!
//! # Pipeline
//!
//! 1. A [`SheetSource`] hands out raw sheets by index ([`WorkbookSource`] for
//!    files on disk, [`MemorySource`] for sheets built in code).
//! 2. Every header is reduced with [`normalize_key`] so that `"Submitted By"`,
//!    `"submittedby"` and `" SubmittedBy "` name the same column.
//! 3. [`load_from`] concatenates the merged sheets into a [`JobTable`] and wraps
//!    it in a [`LoadOutcome`]. Failures never escape: they become
//!    [`LoadOutcome::LoadFailed`], whose table is empty.
//!
//! # Example
//!
//! ```no_run
//! use jobview_ingest::load;
//!
//! let outcome = load("jobs.xlsx");
//! if let Some(reason) = outcome.failure_reason() {
//!     tracing::warn!(%reason, "serving an empty dataset");
//! }
//! println!("{} jobs", outcome.table().len());
//! ```

pub mod error;
pub mod loader;
pub mod normalize;
pub mod sheet;
pub mod source;
pub mod table;

pub use error::IngestError;
pub use loader::{load, load_from, LoadOutcome, DIAGNOSTIC_SHEETS, MERGED_SHEETS};
pub use normalize::normalize_key;
pub use sheet::{CellValue, RawSheet};
pub use source::{MemorySource, SheetSource, WorkbookSource};
pub use table::{JobRow, JobTable};
