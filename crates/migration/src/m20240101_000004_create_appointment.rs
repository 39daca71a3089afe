//! Create `appointment` table.
//! Client bookings; each belongs to exactly one master.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(pk_auto(Appointment::Id))
                    .col(string_len(Appointment::ClientName, 100).not_null())
                    .col(string_len(Appointment::ClientPhone, 20).not_null())
                    .col(timestamp_with_time_zone(Appointment::Date).not_null())
                    .col(string_len(Appointment::Status, 20).not_null().default("awaiting"))
                    .col(text_null(Appointment::Comment))
                    .col(integer(Appointment::MasterId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_master")
                            .from(Appointment::Table, Appointment::MasterId)
                            .to(Master::Table, Master::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Appointment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Appointment {
    Table,
    Id,
    ClientName,
    ClientPhone,
    Date,
    Status,
    Comment,
    MasterId,
}

#[derive(DeriveIden)]
enum Master { Table, Id }
