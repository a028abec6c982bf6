//! Logical job fields and the normalized columns that may carry them
//!
//! Job logs come from several exporters that never agreed on column names.
//! Each logical field lists its candidate keys in priority order; for a given
//! row, the first candidate holding a real value supplies the field. Because
//! lookup is per row, a sheet using `createdby` and another using
//! `submittedby` merge cleanly.

use jobview_ingest::{normalize_key, CellValue, JobRow};

/// Default candidate keys, already normalized.
pub mod aliases {
    /// Job identifier
    pub const JOB_ID: &[&str] = &["workflowid", "jobid", "name", "jobname", "id"];
    /// Submitter identity
    pub const SUBMITTED_BY: &[&str] = &["submittedby", "createdby", "userid", "user"];
    /// Status text
    pub const STATUS: &[&str] = &["status", "statusmessage", "state"];
    /// Submission timestamp
    pub const SUBMIT_TIME: &[&str] = &["createdat", "submittedat", "submittime", "timestamp"];
    /// Failure explanation
    pub const ERROR_MESSAGE: &[&str] = &["errormessage", "error"];
    /// Output artifact filename
    pub const OUTPUT_RESULT: &[&str] = &["outputresult", "outputresponse", "output"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    JobId,
    SubmittedBy,
    Status,
    SubmitTime,
    ErrorMessage,
    OutputResult,
}

impl JobField {
    pub const ALL: [JobField; 6] = [
        JobField::JobId,
        JobField::SubmittedBy,
        JobField::Status,
        JobField::SubmitTime,
        JobField::ErrorMessage,
        JobField::OutputResult,
    ];

    fn default_aliases(self) -> &'static [&'static str] {
        match self {
            JobField::JobId => aliases::JOB_ID,
            JobField::SubmittedBy => aliases::SUBMITTED_BY,
            JobField::Status => aliases::STATUS,
            JobField::SubmitTime => aliases::SUBMIT_TIME,
            JobField::ErrorMessage => aliases::ERROR_MESSAGE,
            JobField::OutputResult => aliases::OUTPUT_RESULT,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Candidate column keys for every [`JobField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSchema {
    keys: [Vec<String>; 6],
}

impl Default for JobSchema {
    fn default() -> Self {
        Self {
            keys: JobField::ALL.map(|field| {
                field
                    .default_aliases()
                    .iter()
                    .map(|key| key.to_string())
                    .collect()
            }),
        }
    }
}

impl JobSchema {
    /// Replace the candidate columns for one field; names are normalized first.
    pub fn with_aliases<I, S>(mut self, field: JobField, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keys[field.slot()] = columns
            .into_iter()
            .map(|column| normalize_key(column.as_ref()))
            .collect();
        self
    }

    pub fn aliases(&self, field: JobField) -> &[String] {
        &self.keys[field.slot()]
    }

    /// First present cell among the field's candidate columns.
    pub fn lookup<'a>(&self, row: &JobRow<'a>, field: JobField) -> Option<&'a CellValue> {
        self.aliases(field).iter().find_map(|key| row.present(key))
    }
}
