//! Domain access layer providing business-oriented CRUD operations on top of models.
//! - Validates payloads before anything touches storage.
//! - Runs every multi-step write (cascade delete, link replacement,
//!   create/update with links) inside one transaction.
//! - Provides clear error types the HTTP layer maps to status codes.

pub mod errors;
pub mod inputs;
pub mod validation;
pub mod sorting;
pub mod records;
pub mod links;
pub mod masters;
pub mod appointments;
pub mod catalog;
pub mod seed;
pub mod auth;
#[cfg(test)]
pub mod test_support;

pub use errors::DomainError;
