//! API-key authentication: principals and roles (domain), the injected
//! key store (repository) and the check used by the HTTP layer (service).

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;

pub use domain::{Principal, Role};
pub use errors::AuthError;
pub use repository::{CredentialStore, StaticCredentialStore};
pub use service::ApiKeyAuth;
