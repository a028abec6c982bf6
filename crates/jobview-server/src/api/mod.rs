//! HTTP surface: router assembly, startup ingestion and the serve loop

pub mod response;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{signal, sync::oneshot};
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::config::{Config, CorsConfig, DataConfig};
use crate::features::{self, auth::CredentialStore, jobs::JobCatalog, FeatureState};
use crate::middleware;
use crate::storage::Storage;
use jobview_ingest::LoadOutcome;

/// Ingest the workbook and wrap it in a catalog.
///
/// Parsing runs on a detached thread rather than the blocking pool: a read
/// that never returns (stalled mount, FIFO) must not keep the runtime from
/// shutting down. A load that outlives `ingest_timeout_secs` is abandoned
/// and treated as failed.
pub async fn load_catalog(data: &DataConfig) -> JobCatalog {
    let path = data.workbook_path.clone();
    let limit = Duration::from_secs(data.ingest_timeout_secs);
    let (tx, rx) = oneshot::channel();

    let spawned = std::thread::Builder::new()
        .name("jobview-ingest".to_string())
        .spawn(move || {
            // The receiver is gone once the load has timed out
            let _ = tx.send(jobview_ingest::load(path));
        });

    let outcome = match spawned {
        Err(e) => {
            tracing::error!(error = %e, "Failed to start ingestion thread");
            LoadOutcome::failed(format!("Failed to start ingestion thread: {}", e))
        },
        Ok(_) => match tokio::time::timeout(limit, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => {
                tracing::error!("Ingestion thread exited without a result");
                LoadOutcome::failed("Ingestion thread exited without a result")
            },
            Err(_) => {
                tracing::error!(timeout_secs = data.ingest_timeout_secs, "Ingestion timed out");
                LoadOutcome::failed(format!(
                    "Ingestion timed out after {} seconds",
                    data.ingest_timeout_secs
                ))
            },
        },
    };

    JobCatalog::new(outcome)
}

/// Build shared state from configuration, ingesting the workbook once.
pub async fn build_state(config: &Config) -> FeatureState {
    let catalog = load_catalog(&config.data).await;
    let storage = Storage::new(config.storage.clone());
    let credentials = CredentialStore::from_credentials(&config.auth.users);

    info!(identities = credentials.len(), "Credential store ready");

    FeatureState {
        catalog,
        storage,
        credentials: Arc::new(credentials),
    }
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = build_state(&config).await;
    let app = create_router(state, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(state: FeatureState, cors: &CorsConfig) -> Router {
    let catalog = state.catalog.clone();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(catalog)
        .merge(features::router(state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Jobview Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Always 200; a failed load shows up as `degraded` with its reason.
async fn health(State(catalog): State<JobCatalog>) -> impl IntoResponse {
    let status = if catalog.is_available() {
        "healthy"
    } else {
        "degraded"
    };

    Json(json!({
        "status": status,
        "dataset": catalog.status(),
    }))
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // In-flight requests are short reads; a brief grace period is enough
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_load_catalog_missing_workbook_degrades() {
        let data = DataConfig {
            workbook_path: PathBuf::from("/no/such/jobs.xlsx"),
            ingest_timeout_secs: 5,
        };

        let catalog = load_catalog(&data).await;
        assert!(!catalog.is_available());
        assert!(catalog.list_jobs(true, "anyone").is_err());
    }

    /// A workbook read that never returns must not outlive the runtime.
    #[cfg(unix)]
    #[test]
    fn test_hung_ingestion_does_not_block_runtime_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let fifo = dir.path().join("jobs.xlsx");
        let status = std::process::Command::new("mkfifo")
            .arg(&fifo)
            .status()
            .unwrap();
        assert!(status.success());

        let data = DataConfig {
            workbook_path: fifo,
            ingest_timeout_secs: 1,
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        let catalog = runtime.block_on(load_catalog(&data));

        assert!(!catalog.is_available());
        match catalog.status() {
            crate::features::jobs::DatasetStatus::Failed { reason } => {
                assert!(reason.contains("timed out"), "unexpected reason: {}", reason)
            },
            other => panic!("expected a failed load, got {:?}", other),
        }

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            drop(runtime);
            let _ = done_tx.send(());
        });

        assert!(
            done_rx.recv_timeout(Duration::from_secs(5)).is_ok(),
            "runtime shutdown waited on the ingestion read"
        );
    }
}
