use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Appointment: lookups by owning master
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointment_master")
                    .table(Appointment::Table)
                    .col(Appointment::MasterId)
                    .to_owned(),
            )
            .await?;

        // Appointment: default list order
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointment_date")
                    .table(Appointment::Table)
                    .col(Appointment::Date)
                    .to_owned(),
            )
            .await?;

        // Join tables: reverse lookups when a service is deleted
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_master_service_service")
                    .table(MasterService::Table)
                    .col(MasterService::ServiceId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointment_service_service")
                    .table(AppointmentService::Table)
                    .col(AppointmentService::ServiceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_appointment_master").table(Appointment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_appointment_date").table(Appointment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_master_service_service").table(MasterService::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_appointment_service_service")
                    .table(AppointmentService::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Appointment { Table, MasterId, Date }

#[derive(DeriveIden)]
enum MasterService { Table, ServiceId }

#[derive(DeriveIden)]
enum AppointmentService { Table, ServiceId }
