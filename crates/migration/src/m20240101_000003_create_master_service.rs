//! Create `master_service` join table.
//! One row per (master, service) pair; the pair is unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MasterService::Table)
                    .if_not_exists()
                    .col(pk_auto(MasterService::Id))
                    .col(integer(MasterService::MasterId).not_null())
                    .col(integer(MasterService::ServiceId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_master_service_master")
                            .from(MasterService::Table, MasterService::MasterId)
                            .to(Master::Table, Master::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_master_service_service")
                            .from(MasterService::Table, MasterService::ServiceId)
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
                    .name("uniq_master_service_pair")
                    .table(MasterService::Table)
                    .col(MasterService::MasterId)
                    .col(MasterService::ServiceId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MasterService::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MasterService { Table, Id, MasterId, ServiceId }

#[derive(DeriveIden)]
enum Master { Table, Id }

#[derive(DeriveIden)]
enum Service { Table, Id }
