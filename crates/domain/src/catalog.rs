//! Service catalog: the billable offerings masters provide.

use models::{appointment_service, master_service, service};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::{debug, info, instrument};

use crate::errors::DomainError;
use crate::inputs::ServiceInput;
use crate::sorting::{ListOptions, ServiceSort};
use crate::validation::{optional_text, validate_new_service, validate_service_changes};

async fn ensure_title_free<C: ConnectionTrait>(
    db: &C,
    title: &str,
    except: Option<i32>,
) -> Result<(), DomainError> {
    match service::find_by_title(db, title).await? {
        Some(other) if Some(other.id) != except => {
            Err(DomainError::Conflict(format!("title {} is already taken", title)))
        }
        _ => Ok(()),
    }
}

pub async fn list_services(
    db: &DatabaseConnection,
    opts: ListOptions<ServiceSort>,
) -> Result<Vec<service::Model>, DomainError> {
    let rows = opts.apply(service::Entity::find()).all(db).await?;
    debug!(count = rows.len(), sort = ?opts.sort, direction = ?opts.direction, "services listed");
    Ok(rows)
}

pub async fn get_service(db: &DatabaseConnection, id: i32) -> Result<service::Model, DomainError> {
    service::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("service", id))
}

#[instrument(skip(db, input))]
pub async fn create_service(
    db: &DatabaseConnection,
    input: ServiceInput,
) -> Result<service::Model, DomainError> {
    validate_new_service(&input)?;
    let title = input.title.as_deref().map(str::trim).unwrap_or_default().to_string();
    let price = input
        .price
        .ok_or_else(|| DomainError::Validation("price is required".into()))?;

    let txn = db.begin().await?;
    ensure_title_free(&txn, &title, None).await?;
    let created = service::ActiveModel {
        title: Set(title),
        description: Set(optional_text(input.description.as_deref())),
        price: Set(price),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(service_id = created.id, title = %created.title, price = %created.price, "service created");
    Ok(created)
}

#[instrument(skip(db, input))]
pub async fn update_service(
    db: &DatabaseConnection,
    id: i32,
    input: ServiceInput,
) -> Result<service::Model, DomainError> {
    validate_service_changes(&input)?;

    let txn = db.begin().await?;
    let existing = service::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("service", id))?;
    let mut am: service::ActiveModel = existing.clone().into();
    if let Some(v) = input.title.as_deref() {
        let title = v.trim();
        ensure_title_free(&txn, title, Some(id)).await?;
        am.title = Set(title.to_string());
    }
    if input.description.is_some() {
        am.description = Set(optional_text(input.description.as_deref()));
    }
    if let Some(price) = input.price {
        am.price = Set(price);
    }
    let updated = if am.is_changed() { am.update(&txn).await? } else { existing };
    txn.commit().await?;

    info!(service_id = id, "service updated");
    Ok(updated)
}

/// Delete a service nobody references. Linked services fail with InUse.
#[instrument(skip(db))]
pub async fn delete_service(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;
    if service::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(DomainError::not_found("service", id));
    }
    let masters = master_service::count_for_service(&txn, id).await?;
    let appointments = appointment_service::count_for_service(&txn, id).await?;
    if masters > 0 || appointments > 0 {
        return Err(DomainError::InUse(format!(
            "service {} is linked to {} master(s) and {} appointment(s)",
            id, masters, appointments
        )));
    }
    service::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(service_id = id, "service deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_master, setup_db};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn offering(title: &str, price: &str) -> ServiceInput {
        ServiceInput {
            title: Some(title.into()),
            description: None,
            price: Some(Decimal::from_str(price).unwrap()),
        }
    }

    #[tokio::test]
    async fn crud_round_trip() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let mut input = offering("Haircut", "1000.00");
        input.description = Some("Classic haircut".into());
        let created = create_service(&db, input).await?;
        assert_eq!(created.price, Decimal::from_str("1000.00")?);
        assert_eq!(get_service(&db, created.id).await?, created);

        let change = ServiceInput {
            price: Some(Decimal::from_str("1100.50")?),
            description: Some("".into()),
            ..Default::default()
        };
        let updated = update_service(&db, created.id, change).await?;
        assert_eq!(updated.title, "Haircut");
        assert_eq!(updated.price, Decimal::from_str("1100.50")?);
        assert_eq!(updated.description, None);

        delete_service(&db, created.id).await?;
        assert!(matches!(get_service(&db, created.id).await, Err(DomainError::NotFound(_))));
        assert!(matches!(delete_service(&db, created.id).await, Err(DomainError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_title_is_conflict() -> anyhow::Result<()> {
        let db = setup_db().await?;
        create_service(&db, offering("Shave", "800")).await?;
        let err = create_service(&db, offering("Shave", "900")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m.contains("title")));
        assert_eq!(list_services(&db, ListOptions::default()).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn linked_service_cannot_be_deleted() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let s = create_service(&db, offering("Styling", "1200")).await?;
        let m = seed_master(&db, "Anna", "Petrova", "987-654-3210").await?;
        master_service::insert_for_master(&db, m.id, &[s.id]).await?;

        let err = delete_service(&db, s.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InUse(ref msg) if msg.contains("1 master(s)")));
        assert!(get_service(&db, s.id).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn list_by_price_desc() -> anyhow::Result<()> {
        let db = setup_db().await?;
        for (t, p) in [("Haircut", "1000"), ("Shave", "800"), ("Coloring", "1500")] {
            create_service(&db, offering(t, p)).await?;
        }
        let titles = |v: Vec<service::Model>| v.into_iter().map(|s| s.title).collect::<Vec<_>>();
        let by_price = list_services(&db, ListOptions::parse(Some("price"), Some("desc"))).await?;
        assert_eq!(titles(by_price), vec!["Coloring", "Haircut", "Shave"]);
        let by_title = list_services(&db, ListOptions::parse(Some("title"), None)).await?;
        assert_eq!(titles(by_title), vec!["Coloring", "Haircut", "Shave"]);
        let by_id = list_services(&db, ListOptions::default()).await?;
        assert_eq!(titles(by_id), vec!["Haircut", "Shave", "Coloring"]);
        Ok(())
    }
}
