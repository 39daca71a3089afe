//! Migrator registering entity-specific migrations in dependency order.
//! Referenced tables come first; indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_service;
mod m20240101_000002_create_master;
mod m20240101_000003_create_master_service;
mod m20240101_000004_create_appointment;
mod m20240101_000005_create_appointment_service;
mod m20240101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_service::Migration),
            Box::new(m20240101_000002_create_master::Migration),
            Box::new(m20240101_000003_create_master_service::Migration),
            Box::new(m20240101_000004_create_appointment::Migration),
            Box::new(m20240101_000005_create_appointment_service::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000006_add_indexes::Migration),
        ]
    }
}
