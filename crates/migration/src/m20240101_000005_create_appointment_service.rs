//! Create `appointment_service` join table.
//! One row per (appointment, service) pair; the pair is unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppointmentService::Table)
                    .if_not_exists()
                    .col(pk_auto(AppointmentService::Id))
                    .col(integer(AppointmentService::AppointmentId).not_null())
                    .col(integer(AppointmentService::ServiceId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_service_appointment")
                            .from(AppointmentService::Table, AppointmentService::AppointmentId)
                            .to(Appointment::Table, Appointment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_service_service")
                            .from(AppointmentService::Table, AppointmentService::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_appointment_service_pair")
                    .table(AppointmentService::Table)
                    .col(AppointmentService::AppointmentId)
                    .col(AppointmentService::ServiceId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AppointmentService::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AppointmentService { Table, Id, AppointmentId, ServiceId }

#[derive(DeriveIden)]
enum Appointment { Table, Id }

#[derive(DeriveIden)]
enum Service { Table, Id }
