use std::collections::HashMap;

use async_trait::async_trait;
use configs::AuthConfig;

use super::domain::{Principal, Role};
use super::errors::AuthError;

/// Resolves API keys to principals. Injected into the HTTP layer so key
/// storage can change without touching handlers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_key(&self, api_key: &str) -> Result<Option<Principal>, AuthError>;
}

/// Keys fixed at startup, usually from the `[[auth.keys]]` config section.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    keys: HashMap<String, Principal>,
}

impl StaticCredentialStore {
    pub fn from_config(cfg: &AuthConfig) -> Result<Self, AuthError> {
        let mut store = Self::default();
        for entry in &cfg.keys {
            let role: Role = entry.role.parse()?;
            store.insert(&entry.api_key, &entry.username, role);
        }
        Ok(store)
    }

    pub fn insert(&mut self, api_key: &str, username: &str, role: Role) {
        self.keys.insert(api_key.to_string(), Principal { username: username.to_string(), role });
    }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn find_by_key(&self, api_key: &str) -> Result<Option<Principal>, AuthError> {
        Ok(self.keys.get(api_key).cloned())
    }
}
