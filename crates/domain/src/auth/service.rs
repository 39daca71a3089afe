use std::sync::Arc;

use tracing::{debug, instrument};

use super::domain::{Principal, Role};
use super::errors::AuthError;
use super::repository::CredentialStore;

/// API-key check independent of web framework.
#[derive(Clone)]
pub struct ApiKeyAuth {
    store: Arc<dyn CredentialStore>,
}

impl ApiKeyAuth {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self { Self { store } }

    /// Resolve the presented key and check it grants `required`.
    ///
    /// # Examples
    /// ```
    /// use domain::auth::{ApiKeyAuth, AuthError, Role, StaticCredentialStore};
    /// use std::sync::Arc;
    /// let mut store = StaticCredentialStore::default();
    /// store.insert("desk-key", "front-desk", Role::User);
    /// let auth = ApiKeyAuth::new(Arc::new(store));
    /// let who = tokio_test::block_on(auth.authorize(Some("desk-key"), Role::User)).unwrap();
    /// assert_eq!(who.username, "front-desk");
    /// let denied = tokio_test::block_on(auth.authorize(Some("desk-key"), Role::Admin));
    /// assert!(matches!(denied, Err(AuthError::Forbidden)));
    /// ```
    #[instrument(skip(self, api_key))]
    pub async fn authorize(
        &self,
        api_key: Option<&str>,
        required: Role,
    ) -> Result<Principal, AuthError> {
        let key = api_key.map(str::trim).filter(|k| !k.is_empty()).ok_or(AuthError::Unauthorized)?;
        let principal = self.store.find_by_key(key).await?.ok_or(AuthError::Unauthorized)?;
        if !principal.role.allows(required) {
            debug!(username = %principal.username, role = %principal.role, "insufficient role");
            return Err(AuthError::Forbidden);
        }
        Ok(principal)
    }
}
