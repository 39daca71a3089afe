#![cfg(test)]
use std::str::FromStr;

use migration::MigratorTrait;
use models::db::connect_in_memory;
use models::{master, service};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Fresh in-memory database with migrations applied. Each test gets its own.
pub async fn setup_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_master(
    db: &DatabaseConnection,
    first: &str,
    last: &str,
    phone: &str,
) -> Result<master::Model, anyhow::Error> {
    let am = master::ActiveModel {
        first_name: Set(first.into()),
        last_name: Set(last.into()),
        middle_name: Set(None),
        phone: Set(phone.into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn seed_service(
    db: &DatabaseConnection,
    title: &str,
    price: &str,
) -> Result<service::Model, anyhow::Error> {
    let am = service::ActiveModel {
        title: Set(title.into()),
        description: Set(None),
        price: Set(Decimal::from_str(price)?),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
