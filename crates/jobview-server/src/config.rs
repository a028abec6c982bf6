//! Configuration management

use jobview_common::JobviewError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::storage::config::StorageConfig;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default workbook holding the job log.
pub const DEFAULT_WORKBOOK_PATH: &str = "jobs.xlsx";

/// Default upper bound on startup ingestion, in seconds.
pub const DEFAULT_INGEST_TIMEOUT_SECS: u64 = 30;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Job data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub workbook_path: PathBuf,
    /// Ingestion taking longer than this is abandoned and the server starts empty
    pub ingest_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// Static login credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub users: Vec<Credential>,
}

/// One identity and its secret
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parse `email=secret` pairs separated by commas.
///
/// Emails are trimmed; secrets are taken verbatim. Empty entries are skipped.
pub fn parse_credentials(entries: &str) -> jobview_common::Result<Vec<Credential>> {
    entries
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let (email, password) = entry.split_once('=').ok_or_else(|| {
                JobviewError::parse(format!(
                    "Credential entry '{}' must look like email=secret",
                    entry.trim()
                ))
            })?;

            let email = email.trim();
            if email.is_empty() || password.is_empty() {
                return Err(JobviewError::parse(
                    "Credential entries need both an email and a secret",
                ));
            }

            Ok(Credential {
                email: email.to_string(),
                password: password.to_string(),
            })
        })
        .collect()
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let users = match std::env::var("JOBVIEW_USERS") {
            Ok(entries) => parse_credentials(&entries)?,
            Err(_) => Vec::new(),
        };

        let config = Config {
            server: ServerConfig {
                host: std::env::var("JOBVIEW_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_or("JOBVIEW_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or(
                    "JOBVIEW_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            data: DataConfig {
                workbook_path: std::env::var("JOBVIEW_WORKBOOK")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_WORKBOOK_PATH)),
                ingest_timeout_secs: env_or("JOBVIEW_INGEST_TIMEOUT", DEFAULT_INGEST_TIMEOUT_SECS),
            },
            storage: StorageConfig::from_env(),
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", true),
            },
            auth: AuthConfig { users },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> jobview_common::Result<()> {
        if self.server.port == 0 {
            return Err(JobviewError::config("Server port must be greater than 0"));
        }

        if self.data.workbook_path.as_os_str().is_empty() {
            return Err(JobviewError::config("Workbook path cannot be empty"));
        }

        if self.data.ingest_timeout_secs == 0 {
            return Err(JobviewError::config(
                "Ingest timeout must be greater than 0 seconds",
            ));
        }

        if self.storage.root.as_os_str().is_empty() {
            return Err(JobviewError::config("Download directory cannot be empty"));
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        if self.auth.users.is_empty() {
            tracing::warn!("No login credentials configured (JOBVIEW_USERS) - every login will be rejected");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            data: DataConfig {
                workbook_path: PathBuf::from(DEFAULT_WORKBOOK_PATH),
                ingest_timeout_secs: DEFAULT_INGEST_TIMEOUT_SECS,
            },
            storage: StorageConfig::default(),
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
            auth: AuthConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.root, PathBuf::from("data/responses"));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_ingest_timeout() {
        let mut config = Config::default();
        config.data.ingest_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_credentials() {
        let users = parse_credentials(" Alice@X.com=s3cret, bob@x.com=pa=ss ,").unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "Alice@X.com");
        assert_eq!(users[0].password, "s3cret");
        // Only the first '=' separates identity from secret
        assert_eq!(users[1].password, "pa=ss ");
    }

    #[test]
    fn test_parse_credentials_rejects_malformed() {
        assert!(parse_credentials("alice@x.com").is_err());
        assert!(parse_credentials("=secret").is_err());
        assert!(parse_credentials("alice@x.com=").is_err());
        assert!(parse_credentials("").unwrap().is_empty());
    }

    #[test]
    fn test_credential_debug_redacts_secret() {
        let credential = Credential {
            email: "alice@x.com".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", credential);
        assert!(rendered.contains("alice@x.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
