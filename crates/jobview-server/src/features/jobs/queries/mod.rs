//! Job queries

pub mod list_jobs;

pub use list_jobs::{ListJobsError, ListJobsQuery, ListJobsResponse, DEFAULT_REQUESTER};
