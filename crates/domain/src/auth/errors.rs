use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid API key")]
    Unauthorized,
    #[error("admin privileges required")]
    Forbidden,
    #[error("credential store error: {0}")]
    Store(String),
}

