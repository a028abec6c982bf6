//! Startup ingestion
//!
//! [`load`] runs once at process start. Whatever goes wrong (missing file,
//! corrupt workbook, absent sheet) is logged and turned into
//! [`LoadOutcome::LoadFailed`]; callers always get a table, possibly empty.

use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

use crate::error::IngestError;
use crate::source::{SheetSource, WorkbookSource};
use crate::table::JobTable;

/// Sheet indices concatenated into the queryable table.
pub const MERGED_SHEETS: [usize; 2] = [0, 1];

/// Number of leading sheets read and logged at startup.
///
/// Index 2 is read for diagnostics only and is never merged.
pub const DIAGNOSTIC_SHEETS: usize = 3;

static EMPTY_TABLE: JobTable = JobTable::empty();

/// Result of startup ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(JobTable),
    LoadFailed { reason: String },
}

impl LoadOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        LoadOutcome::LoadFailed {
            reason: reason.into(),
        }
    }

    /// The queryable table; empty when loading failed.
    pub fn table(&self) -> &JobTable {
        match self {
            LoadOutcome::Loaded(table) => table,
            LoadOutcome::LoadFailed { .. } => &EMPTY_TABLE,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::LoadFailed { reason } => Some(reason),
        }
    }
}

/// Load the job table from a workbook on disk.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load(path: impl AsRef<Path>) -> LoadOutcome {
    match WorkbookSource::open(path.as_ref()) {
        Ok(mut source) => load_from(&mut source),
        Err(e) => degrade(e),
    }
}

/// Load the job table from any sheet source.
pub fn load_from<S: SheetSource>(source: &mut S) -> LoadOutcome {
    match read_merged(source) {
        Ok(table) => {
            info!(
                rows = table.len(),
                columns = ?table.columns(),
                "Job data loaded"
            );
            LoadOutcome::Loaded(table)
        },
        Err(e) => degrade(e),
    }
}

fn degrade(err: IngestError) -> LoadOutcome {
    error!(error = %err, "Error loading job data, continuing with an empty table");
    LoadOutcome::failed(err.to_string())
}

fn read_merged<S: SheetSource>(source: &mut S) -> Result<JobTable, IngestError> {
    let mut merged = Vec::with_capacity(MERGED_SHEETS.len());

    for index in 0..DIAGNOSTIC_SHEETS {
        let is_merged = MERGED_SHEETS.contains(&index);

        let sheet = match source.read_sheet(index) {
            Ok(sheet) => sheet,
            Err(e) if !is_merged => {
                debug!(index, error = %e, "Diagnostic sheet unavailable");
                continue;
            },
            Err(e) => return Err(e),
        };

        info!(
            index,
            sheet = %sheet.name,
            columns = ?sheet.normalized_headers(),
            rows = sheet.row_count(),
            "Sheet columns"
        );

        if is_merged {
            merged.push(sheet);
        } else {
            warn!(
                index,
                sheet = %sheet.name,
                "Sheet is read for diagnostics only and is not merged into the job table"
            );
        }
    }

    Ok(JobTable::concat(merged))
}
