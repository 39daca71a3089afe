use models::errors::ModelError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// Row exists but other rows still reference it.
    #[error("in use: {0}")]
    InUse(String),
    /// A payload names a master or service that does not exist.
    #[error("unknown reference: {0}")]
    UnknownReference(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl DomainError {
    pub fn not_found(entity: &str, id: i32) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    /// Human-readable message without the category prefix.
    pub fn message(&self) -> String {
        match self {
            DomainError::Validation(m)
            | DomainError::NotFound(m)
            | DomainError::Conflict(m)
            | DomainError::InUse(m)
            | DomainError::UnknownReference(m)
            | DomainError::Db(m) => m.clone(),
            DomainError::Model(ModelError::Conflict(detail)) => conflict_message(detail),
            DomainError::Model(ModelError::Db(m)) => m.clone(),
        }
    }
}

/// Name the duplicated field from the driver's constraint detail
/// (`UNIQUE constraint failed: master.phone` on SQLite,
/// `... constraint "master_phone_key"` on Postgres).
fn conflict_message(detail: &str) -> String {
    if detail.contains("phone") {
        "phone is already registered".into()
    } else if detail.contains("title") {
        "title is already taken".into()
    } else if detail.contains("master_service") || detail.contains("appointment_service") {
        "services contains a duplicate link".into()
    } else {
        "duplicate value violates a unique constraint".into()
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self { DomainError::Model(ModelError::from(e)) }
}
