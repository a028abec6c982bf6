//! List jobs query
//!
//! Lists the jobs a requester submitted, or all jobs when `view_all` is set.

use serde::{Deserialize, Serialize};

use crate::features::jobs::catalog::JobCatalog;
use crate::features::jobs::record::JobRecord;

/// Requester used when the client sends no `user_id`.
pub const DEFAULT_REQUESTER: &str = "user_123";

/// Query to list jobs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListJobsQuery {
    /// Return every job instead of only the requester's
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub view_all: bool,
    /// Identity whose jobs to list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Query-string boolean: `true`/`false` plus `1`/`0`, `yes`/`no`, `on`/`off`,
/// `t`/`f` and `y`/`n`, in any case.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
        _ => Err(serde::de::Error::custom(format!(
            "invalid boolean '{}' for view_all",
            raw
        ))),
    }
}

impl ListJobsQuery {
    pub fn requester(&self) -> &str {
        self.user_id.as_deref().unwrap_or(DEFAULT_REQUESTER)
    }
}

/// Response for list jobs query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListJobsResponse {
    pub jobs: Vec<JobRecord>,
}

/// Error type for list jobs query
#[derive(Debug, thiserror::Error)]
pub enum ListJobsError {
    /// The job table is empty: ingestion failed or the workbook had no rows
    #[error("Job data not loaded")]
    DataUnavailable,
}

#[tracing::instrument(skip(catalog), fields(requester = %query.requester()))]
pub fn handle(catalog: &JobCatalog, query: ListJobsQuery) -> Result<ListJobsResponse, ListJobsError> {
    let jobs = catalog.list_jobs(query.view_all, query.requester())?;

    tracing::debug!(count = jobs.len(), view_all = query.view_all, "Listed jobs");

    Ok(ListJobsResponse { jobs })
}
