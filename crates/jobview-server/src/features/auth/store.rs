//! Static credential store

use std::collections::HashMap;
use subtle::ConstantTimeEq;

use crate::config::Credential;

/// Identity to secret map; identities are kept trimmed and lowercased.
#[derive(Default, Clone)]
pub struct CredentialStore {
    secrets: HashMap<String, String>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("identities", &self.secrets.len())
            .finish()
    }
}

/// Canonical form of an identity: trimmed and lowercased.
pub fn canonical_identity(email: &str) -> String {
    email.trim().to_lowercase()
}

impl CredentialStore {
    /// Later entries for the same identity replace earlier ones.
    pub fn from_credentials<'a, I>(credentials: I) -> Self
    where
        I: IntoIterator<Item = &'a Credential>,
    {
        let secrets = credentials
            .into_iter()
            .map(|c| (canonical_identity(&c.email), c.password.clone()))
            .collect();
        Self { secrets }
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Canonical identity if the secret matches.
    pub fn verify(&self, email: &str, password: &str) -> Option<String> {
        let identity = canonical_identity(email);
        let secret = self.secrets.get(&identity)?;

        bool::from(secret.as_bytes().ct_eq(password.as_bytes())).then_some(identity)
    }
}
