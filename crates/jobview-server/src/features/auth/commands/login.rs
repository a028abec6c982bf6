//! Login command

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::auth::store::CredentialStore;

#[derive(Clone, Deserialize)]
pub struct LoginCommand {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token
    pub token: String,
    /// Canonical identity to send back as `user_id`
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Email is required and cannot be empty")]
    EmailRequired,
    #[error("Password is required and cannot be empty")]
    PasswordRequired,
    #[error("Invalid email or password")]
    InvalidCredentials,
}

impl LoginCommand {
    pub fn validate(&self) -> Result<(), LoginError> {
        if self.email.trim().is_empty() {
            return Err(LoginError::EmailRequired);
        }
        if self.password.is_empty() {
            return Err(LoginError::PasswordRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(store))]
pub fn handle(store: &CredentialStore, command: LoginCommand) -> Result<LoginResponse, LoginError> {
    command.validate()?;

    let Some(email) = store.verify(&command.email, &command.password) else {
        tracing::warn!("Rejected login");
        return Err(LoginError::InvalidCredentials);
    };

    tracing::info!(email = %email, "Login accepted");

    Ok(LoginResponse {
        token: Uuid::new_v4().to_string(),
        email,
    })
}
