//! Persistence schema for the barbershop: one sea-orm entity per table plus
//! the row-level helpers the domain layer composes into transactions.
//!
//! Every helper is generic over [`sea_orm::ConnectionTrait`] so it runs the
//! same against a pooled connection or an open transaction.

pub mod errors;
pub mod db;
pub mod master;
pub mod service;
pub mod appointment;
pub mod master_service;
pub mod appointment_service;

#[cfg(test)]
mod tests;
