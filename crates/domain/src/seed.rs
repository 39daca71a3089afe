//! Demo data for a fresh install.

use models::{master, master_service, service};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use tracing::info;

use crate::errors::DomainError;

const MASTERS: [(&str, &str, &str); 2] = [
    ("Ivan", "Ivanov", "123-456-7890"),
    ("Anna", "Petrova", "987-654-3210"),
];

/// (title, description, price in whole units)
const SERVICES: [(&str, &str, i64); 5] = [
    ("Haircut", "Classic haircut", 1000),
    ("Shave", "Classic shave", 800),
    ("Styling", "Hair styling", 1200),
    ("Coloring", "Hair coloring", 1500),
    ("Manicure", "Men's manicure", 700),
];

/// (master index, service index)
const LINKS: [(usize, usize); 5] = [(0, 0), (0, 1), (1, 2), (1, 3), (0, 4)];

/// Insert demo masters, services and their links when no master exists yet.
/// Returns whether anything was inserted.
pub async fn populate_initial_data(db: &DatabaseConnection) -> Result<bool, DomainError> {
    if master::Entity::find().count(db).await? > 0 {
        info!("seed skipped, masters already present");
        return Ok(false);
    }

    let txn = db.begin().await?;
    let mut masters = Vec::with_capacity(MASTERS.len());
    for (first, last, phone) in MASTERS {
        let m = master::ActiveModel {
            first_name: Set(first.into()),
            last_name: Set(last.into()),
            middle_name: Set(None),
            phone: Set(phone.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        masters.push(m.id);
    }
    let mut services = Vec::with_capacity(SERVICES.len());
    for (title, description, price) in SERVICES {
        let s = service::ActiveModel {
            title: Set(title.into()),
            description: Set(Some(description.into())),
            price: Set(Decimal::new(price * 100, 2)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        services.push(s.id);
    }
    for (m, s) in LINKS {
        master_service::insert_for_master(&txn, masters[m], &[services[s]]).await?;
    }
    txn.commit().await?;

    info!(masters = MASTERS.len(), services = SERVICES.len(), links = LINKS.len(), "demo data seeded");
    Ok(true)
}
