//! Public job record shape and the `details` precedence rule

use jobview_ingest::{CellValue, JobRow};
use serde::{Deserialize, Serialize};

use super::schema::{JobField, JobSchema};

/// Route prefix output artifacts are served under.
pub const DOWNLOAD_PATH_PREFIX: &str = "/download/";

/// One job as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub job_id: Option<String>,
    pub created_by: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    /// Error message, or a download reference to the output artifact
    pub details: Option<String>,
}

impl JobRecord {
    pub fn from_row(row: &JobRow<'_>, schema: &JobSchema) -> Self {
        let text = |field| schema.lookup(row, field).map(CellValue::render);

        Self {
            job_id: text(JobField::JobId),
            created_by: text(JobField::SubmittedBy),
            status: text(JobField::Status),
            created_at: text(JobField::SubmitTime),
            details: resolve_details(
                schema.lookup(row, JobField::ErrorMessage),
                schema.lookup(row, JobField::OutputResult),
            ),
        }
    }
}

/// An error message wins over an output artifact; with neither, no details.
///
/// Presence is all that matters: an empty error message still wins.
pub fn resolve_details(error: Option<&CellValue>, output: Option<&CellValue>) -> Option<String> {
    fn present(cell: Option<&CellValue>) -> Option<&CellValue> {
        cell.filter(|c| c.is_present())
    }

    match (present(error), present(output)) {
        (Some(message), _) => Some(message.render()),
        (None, Some(filename)) => Some(download_reference(&filename.render())),
        (None, None) => None,
    }
}

/// Download path for an output artifact.
///
/// The filename is interpolated as-is: no encoding and no traversal checks.
/// Those belong to [`crate::storage::Storage::resolve`], which serves it.
pub fn download_reference(filename: &str) -> String {
    format!("{}{}", DOWNLOAD_PATH_PREFIX, filename)
}
