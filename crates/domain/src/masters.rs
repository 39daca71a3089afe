use models::{appointment, appointment_service, master, master_service};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::{debug, info, instrument};

use crate::errors::DomainError;
use crate::inputs::MasterInput;
use crate::links::{ensure_services_exist, replace_master_services};
use crate::records::MasterRecord;
use crate::sorting::{ListOptions, MasterSort};
use crate::validation::{optional_text, validate_master_changes, validate_new_master};

fn trimmed(value: Option<&str>) -> String { value.map(str::trim).unwrap_or_default().to_string() }

/// Fails with Conflict when `phone` belongs to a master other than `except`.
async fn ensure_phone_free<C: ConnectionTrait>(
    db: &C,
    phone: &str,
    except: Option<i32>,
) -> Result<(), DomainError> {
    match master::find_by_phone(db, phone).await? {
        Some(other) if Some(other.id) != except => {
            Err(DomainError::Conflict(format!("phone {} is already registered", phone)))
        }
        _ => Ok(()),
    }
}

/// List all masters with their service ids.
pub async fn list_masters(
    db: &DatabaseConnection,
    opts: ListOptions<MasterSort>,
) -> Result<Vec<MasterRecord>, DomainError> {
    let masters = opts.apply(master::Entity::find()).all(db).await?;
    let ids: Vec<i32> = masters.iter().map(|m| m.id).collect();
    let mut links = master_service::service_ids_for_masters(db, &ids).await?;
    debug!(count = masters.len(), sort = ?opts.sort, direction = ?opts.direction, "masters listed");
    Ok(masters
        .into_iter()
        .map(|m| {
            let service_ids = links.remove(&m.id).unwrap_or_default();
            MasterRecord { master: m, service_ids }
        })
        .collect())
}

/// Get a master by id.
pub async fn get_master(db: &DatabaseConnection, id: i32) -> Result<MasterRecord, DomainError> {
    let found = master::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("master", id))?;
    let service_ids = master_service::service_ids_for_master(db, id).await?;
    Ok(MasterRecord { master: found, service_ids })
}

/// Create a master and, when supplied, link their services in one transaction.
#[instrument(skip(db, input))]
pub async fn create_master(
    db: &DatabaseConnection,
    input: MasterInput,
) -> Result<MasterRecord, DomainError> {
    validate_new_master(&input)?;
    let phone = trimmed(input.phone.as_deref());

    let txn = db.begin().await?;
    ensure_phone_free(&txn, &phone, None).await?;
    if let Some(ids) = &input.services {
        ensure_services_exist(&txn, ids).await?;
    }
    let created = master::ActiveModel {
        first_name: Set(trimmed(input.first_name.as_deref())),
        last_name: Set(trimmed(input.last_name.as_deref())),
        middle_name: Set(optional_text(input.middle_name.as_deref())),
        phone: Set(phone),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    let service_ids = input.services.unwrap_or_default();
    master_service::insert_for_master(&txn, created.id, &service_ids).await?;
    txn.commit().await?;

    info!(master_id = created.id, services = service_ids.len(), "master created");
    Ok(MasterRecord { master: created, service_ids })
}

/// Apply the supplied fields. `services` replaces the links when present.
#[instrument(skip(db, input))]
pub async fn update_master(
    db: &DatabaseConnection,
    id: i32,
    input: MasterInput,
) -> Result<MasterRecord, DomainError> {
    validate_master_changes(&input)?;

    let txn = db.begin().await?;
    let existing = master::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("master", id))?;
    let mut am: master::ActiveModel = existing.clone().into();
    if let Some(v) = input.first_name.as_deref() {
        am.first_name = Set(v.trim().to_string());
    }
    if let Some(v) = input.last_name.as_deref() {
        am.last_name = Set(v.trim().to_string());
    }
    if input.middle_name.is_some() {
        am.middle_name = Set(optional_text(input.middle_name.as_deref()));
    }
    if let Some(v) = input.phone.as_deref() {
        let phone = v.trim();
        ensure_phone_free(&txn, phone, Some(id)).await?;
        am.phone = Set(phone.to_string());
    }
    let updated = if am.is_changed() { am.update(&txn).await? } else { existing };
    if let Some(ids) = &input.services {
        replace_master_services(&txn, id, ids).await?;
    }
    let service_ids = master_service::service_ids_for_master(&txn, id).await?;
    txn.commit().await?;

    info!(master_id = id, services_replaced = input.services.is_some(), "master updated");
    Ok(MasterRecord { master: updated, service_ids })
}

/// Delete a master together with their appointments and all links.
#[instrument(skip(db))]
pub async fn delete_master(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;
    if master::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(DomainError::not_found("master", id));
    }
    let appointment_ids = appointment::ids_for_master(&txn, id).await?;
    let booked_links = appointment_service::delete_for_appointments(&txn, &appointment_ids).await?;
    let appointments = appointment::delete_for_master(&txn, id).await?;
    let service_links = master_service::delete_for_master(&txn, id).await?;
    master::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(master_id = id, appointments, booked_links, service_links, "master deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointments::create_appointment;
    use crate::inputs::AppointmentInput;
    use crate::test_support::{seed_service, setup_db};
    use sea_orm::PaginatorTrait;

    fn input(first: &str, last: &str, phone: &str) -> MasterInput {
        MasterInput {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_keeps_service_order() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let mut ids = Vec::new();
        let catalog = [("Haircut", "1000"), ("Shave", "800"), ("Styling", "1200"), ("Coloring", "1500")];
        for (title, price) in catalog {
            ids.push(seed_service(&db, title, price).await?.id);
        }
        let mut payload = input(" Ivan ", "Ivanov", "123-456-7890");
        payload.services = Some(vec![ids[3], ids[1]]);
        let created = create_master(&db, payload).await?;
        assert_eq!(created.master.first_name, "Ivan");
        assert_eq!(created.service_ids, vec![ids[3], ids[1]]);

        let fetched = get_master(&db, created.master.id).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_phone_is_conflict() -> anyhow::Result<()> {
        let db = setup_db().await?;
        create_master(&db, input("Ivan", "Ivanov", "123-456-7890")).await?;
        let err = create_master(&db, input("Anna", "Petrova", "123-456-7890")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m.contains("phone")));
        assert_eq!(master::Entity::find().count(&db).await?, 1);

        let other = create_master(&db, input("Anna", "Petrova", "987-654-3210")).await?;
        let change = MasterInput { phone: Some("123-456-7890".into()), ..Default::default() };
        let err = update_master(&db, other.master.id, change).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(get_master(&db, other.master.id).await?.master.phone, "987-654-3210");

        // Re-submitting one's own phone is not a conflict.
        let same = MasterInput { phone: Some("987-654-3210".into()), ..Default::default() };
        update_master(&db, other.master.id, same).await?;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_service_creates_nothing() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let mut payload = input("Ivan", "Ivanov", "123-456-7890");
        payload.services = Some(vec![77]);
        let err = create_master(&db, payload).await.unwrap_err();
        assert!(matches!(err, DomainError::UnknownReference(_)));
        assert_eq!(master::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn update_services_absent_keeps_empty_clears() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let s1 = seed_service(&db, "Haircut", "1000").await?;
        let s2 = seed_service(&db, "Shave", "800").await?;
        let mut payload = input("Ivan", "Ivanov", "123-456-7890");
        payload.services = Some(vec![s1.id, s2.id]);
        let created = create_master(&db, payload).await?;
        let id = created.master.id;

        let rename = MasterInput {
            last_name: Some("Sidorov".into()),
            middle_name: Some("Petrovich".into()),
            ..Default::default()
        };
        let updated = update_master(&db, id, rename).await?;
        assert_eq!(updated.master.last_name, "Sidorov");
        assert_eq!(updated.master.middle_name.as_deref(), Some("Petrovich"));
        assert_eq!(updated.service_ids, vec![s1.id, s2.id]);

        let clear = MasterInput { middle_name: Some("".into()), services: Some(vec![]), ..Default::default() };
        let updated = update_master(&db, id, clear).await?;
        assert_eq!(updated.master.middle_name, None);
        assert!(updated.service_ids.is_empty());
        assert_eq!(master_service::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_to_appointments_and_links() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let s1 = seed_service(&db, "Haircut", "1000").await?;
        let mut payload = input("Ivan", "Ivanov", "123-456-7890");
        payload.services = Some(vec![s1.id]);
        let m = create_master(&db, payload).await?;
        let keep = create_master(&db, input("Anna", "Petrova", "987-654-3210")).await?;
        for (who, master_id) in [("Petr", m.master.id), ("Olga", keep.master.id)] {
            create_appointment(
                &db,
                AppointmentInput {
                    client_name: Some(who.into()),
                    client_phone: Some("555-0101".into()),
                    master_id: Some(master_id),
                    services: Some(vec![s1.id]),
                    ..Default::default()
                },
            )
            .await?;
        }

        delete_master(&db, m.master.id).await?;
        assert!(matches!(get_master(&db, m.master.id).await, Err(DomainError::NotFound(_))));
        assert_eq!(appointment::Entity::find().count(&db).await?, 1);
        assert_eq!(appointment_service::Entity::find().count(&db).await?, 1);
        assert_eq!(master_service::Entity::find().count(&db).await?, 0);

        assert!(matches!(delete_master(&db, m.master.id).await, Err(DomainError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_sorting() -> anyhow::Result<()> {
        let db = setup_db().await?;
        create_master(&db, input("Boris", "Antonov", "111-111")).await?;
        create_master(&db, input("Anna", "Zueva", "222-222")).await?;
        create_master(&db, input("Anna", "Petrova", "333-333")).await?;

        let names = |v: Vec<MasterRecord>| v.into_iter().map(|r| r.master.last_name).collect::<Vec<_>>();
        let default = names(list_masters(&db, ListOptions::default()).await?);
        assert_eq!(default, vec!["Antonov", "Zueva", "Petrova"]);
        let bogus = names(list_masters(&db, ListOptions::parse(Some("bogus"), None)).await?);
        assert_eq!(bogus, default);
        let by_first = names(list_masters(&db, ListOptions::parse(Some("first_name"), None)).await?);
        assert_eq!(by_first, vec!["Zueva", "Petrova", "Antonov"]);
        let last_desc = ListOptions::parse(Some("last_name"), Some("desc"));
        let by_last_desc = names(list_masters(&db, last_desc).await?);
        assert_eq!(by_last_desc, vec!["Zueva", "Petrova", "Antonov"]);
        Ok(())
    }
}
