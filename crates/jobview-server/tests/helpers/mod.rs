//! Test helpers for jobview server integration tests
//!
//! This module provides utilities for:
//! - Building catalogs from in-memory sheets
//! - Temporary artifact directories
//! - Assembling the full router
#![allow(dead_code)]

use axum::{body::to_bytes, response::Response, Router};
use jobview_ingest::{load_from, CellValue, LoadOutcome, MemorySource, RawSheet};
use jobview_server::{
    api::create_router,
    config::{CorsConfig, Credential},
    features::{auth::CredentialStore, jobs::JobCatalog, FeatureState},
    storage::{config::StorageConfig, Storage},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

pub fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

/// Two sheets with different header spellings for the same fields.
pub fn job_sheets() -> Vec<RawSheet> {
    let a = RawSheet::new(
        "Sheet1",
        headers(&["Work Flow Id", "Submitted By", "Status", "Created At", "Error Message"]),
        vec![
            vec![
                "wf-1".into(),
                "Alice@x.com".into(),
                "done".into(),
                "2024-03-01 10:00:00".into(),
                "disk full".into(),
            ],
            vec![
                "wf-2".into(),
                "bob@x.com".into(),
                "queued".into(),
                CellValue::Missing,
                CellValue::Missing,
            ],
        ],
    );
    let b = RawSheet::new(
        "Sheet2",
        headers(&["workflowid", "submittedby", "STATUS", "Output Result"]),
        vec![vec![
            "wf-3".into(),
            "alice@x.com".into(),
            "running".into(),
            "report.csv".into(),
        ]],
    );

    vec![a, b]
}

pub fn loaded_catalog() -> JobCatalog {
    JobCatalog::new(load_from(&mut MemorySource::new(job_sheets())))
}

pub fn failed_catalog() -> JobCatalog {
    JobCatalog::new(LoadOutcome::failed("Failed to open workbook jobs.xlsx"))
}

pub fn default_cors() -> CorsConfig {
    CorsConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
        allow_credentials: true,
    }
}

/// A router plus the directory backing its downloads.
pub struct TestApp {
    pub router: Router,
    pub artifacts: TempDir,
}

impl TestApp {
    pub fn new(catalog: JobCatalog) -> Self {
        let artifacts = tempfile::tempdir().unwrap();
        std::fs::write(artifacts.path().join("report.csv"), b"id,result\n3,ok\n").unwrap();

        let credentials = CredentialStore::from_credentials(&[Credential {
            email: "alice@x.com".to_string(),
            password: "s3cret".to_string(),
        }]);

        let state = FeatureState {
            catalog,
            storage: Storage::new(StorageConfig::rooted_at(artifacts.path())),
            credentials: Arc::new(credentials),
        };

        Self {
            router: create_router(state, &default_cors()),
            artifacts,
        }
    }

    pub fn loaded() -> Self {
        Self::new(loaded_catalog())
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
