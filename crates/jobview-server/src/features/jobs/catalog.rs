//! Read-only job catalog built once at startup

use jobview_ingest::LoadOutcome;
use serde::Serialize;
use std::sync::Arc;

use super::queries::ListJobsError;
use super::record::JobRecord;
use super::schema::{JobField, JobSchema};

/// The loaded job table plus the schema used to read it.
///
/// Cloning is cheap; every clone shares the same immutable dataset.
#[derive(Debug, Clone)]
pub struct JobCatalog {
    dataset: Arc<LoadOutcome>,
    schema: Arc<JobSchema>,
}

/// Operator-facing view of how ingestion went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DatasetStatus {
    Loaded { rows: usize, columns: Vec<String> },
    Failed { reason: String },
}

impl JobCatalog {
    pub fn new(dataset: LoadOutcome) -> Self {
        Self::with_schema(dataset, JobSchema::default())
    }

    pub fn with_schema(dataset: LoadOutcome, schema: JobSchema) -> Self {
        Self {
            dataset: Arc::new(dataset),
            schema: Arc::new(schema),
        }
    }

    /// Jobs visible to `requester`, or every job when `view_all` is set.
    ///
    /// Submitters match case-insensitively after trimming both sides. Rows
    /// without a submitter never match. Output keeps table order.
    pub fn visible_jobs(&self, view_all: bool, requester: &str) -> Vec<JobRecord> {
        let requester = requester.trim().to_lowercase();

        self.dataset
            .table()
            .rows()
            .filter(|row| {
                view_all
                    || self
                        .schema
                        .lookup(row, JobField::SubmittedBy)
                        .is_some_and(|who| who.render().trim().to_lowercase() == requester)
            })
            .map(|row| JobRecord::from_row(&row, &self.schema))
            .collect()
    }

    /// Like [`Self::visible_jobs`], but an empty table is an error: no
    /// listing is possible at all, which is different from zero matches.
    pub fn list_jobs(&self, view_all: bool, requester: &str) -> Result<Vec<JobRecord>, ListJobsError> {
        if self.dataset.table().is_empty() {
            return Err(ListJobsError::DataUnavailable);
        }

        Ok(self.visible_jobs(view_all, requester))
    }

    /// Whether [`Self::list_jobs`] can answer at all.
    pub fn is_available(&self) -> bool {
        !self.dataset.table().is_empty()
    }

    pub fn status(&self) -> DatasetStatus {
        match self.dataset.as_ref() {
            LoadOutcome::Loaded(table) => DatasetStatus::Loaded {
                rows: table.len(),
                columns: table.columns().to_vec(),
            },
            LoadOutcome::LoadFailed { reason } => DatasetStatus::Failed {
                reason: reason.clone(),
            },
        }
    }
}
