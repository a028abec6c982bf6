//! Jobview Server - Main entry point

use anyhow::Result;
use jobview_common::logging::{init_logging, LogConfig};
use tracing::info;

use jobview_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("jobview-server")
        .filter_directives("jobview_server=debug,jobview_ingest=info,tower_http=debug")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting jobview server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await?;

    info!("Server shut down gracefully");

    Ok(())
}
