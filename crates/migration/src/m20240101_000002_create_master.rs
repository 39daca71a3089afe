//! Create `master` table.
//!
//! Staff members; owners of appointments and master_service links.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Master::Table)
                    .if_not_exists()
                    .col(pk_auto(Master::Id))
                    .col(string_len(Master::FirstName, 50).not_null())
                    .col(string_len(Master::LastName, 50).not_null())
                    .col(string_len_null(Master::MiddleName, 50))
                    .col(string_len(Master::Phone, 20).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Master::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Master { Table, Id, FirstName, LastName, MiddleName, Phone }
