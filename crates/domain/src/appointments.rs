use std::collections::HashMap;

use chrono::Utc;
use models::{appointment, appointment_service, master};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::errors::DomainError;
use crate::inputs::AppointmentInput;
use crate::links::{ensure_services_exist, replace_appointment_services};
use crate::records::AppointmentRecord;
use crate::sorting::{AppointmentSort, ListOptions};
use crate::validation::{optional_text, validate_appointment_changes, validate_new_appointment};

async fn resolve_master<C: ConnectionTrait>(
    db: &C,
    master_id: i32,
) -> Result<master::Model, DomainError> {
    master::Entity::find_by_id(master_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::UnknownReference(format!("master {} does not exist", master_id)))
}

/// Attach masters and service ids to a page of appointments, keeping its order.
async fn into_records<C: ConnectionTrait>(
    db: &C,
    rows: Vec<appointment::Model>,
) -> Result<Vec<AppointmentRecord>, DomainError> {
    let mut master_ids: Vec<i32> = rows.iter().map(|a| a.master_id).collect();
    master_ids.sort_unstable();
    master_ids.dedup();
    let masters: HashMap<i32, master::Model> = master::find_many(db, &master_ids)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let ids: Vec<i32> = rows.iter().map(|a| a.id).collect();
    let mut links = appointment_service::service_ids_for_appointments(db, &ids).await?;

    rows.into_iter()
        .map(|a| {
            let master = masters
                .get(&a.master_id)
                .cloned()
                .ok_or_else(|| {
                    DomainError::Db(format!(
                        "appointment {} references missing master {}",
                        a.id, a.master_id
                    ))
                })?;
            let service_ids = links.remove(&a.id).unwrap_or_default();
            Ok(AppointmentRecord { appointment: a, master, service_ids })
        })
        .collect()
}

/// List all appointments with their master and service ids.
pub async fn list_appointments(
    db: &DatabaseConnection,
    opts: ListOptions<AppointmentSort>,
) -> Result<Vec<AppointmentRecord>, DomainError> {
    let rows = opts.apply(appointment::Entity::find()).all(db).await?;
    debug!(count = rows.len(), sort = ?opts.sort, direction = ?opts.direction, "appointments listed");
    into_records(db, rows).await
}

/// Get an appointment by id.
pub async fn get_appointment(
    db: &DatabaseConnection,
    id: i32,
) -> Result<AppointmentRecord, DomainError> {
    let found = appointment::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("appointment", id))?;
    let mut records = into_records(db, vec![found]).await?;
    records.pop().ok_or_else(|| DomainError::not_found("appointment", id))
}

/// Appointments of one master in default order. A missing master is NotFound.
pub async fn list_appointments_for_master(
    db: &DatabaseConnection,
    master_id: i32,
) -> Result<Vec<AppointmentRecord>, DomainError> {
    if master::Entity::find_by_id(master_id).one(db).await?.is_none() {
        return Err(DomainError::not_found("master", master_id));
    }
    let select = appointment::Entity::find().filter(appointment::Column::MasterId.eq(master_id));
    let rows = ListOptions::<AppointmentSort>::default().apply(select).all(db).await?;
    into_records(db, rows).await
}

/// Book an appointment. Date defaults to now and is stored in UTC.
#[instrument(skip(db, input), fields(master_id = ?input.master_id))]
pub async fn create_appointment(
    db: &DatabaseConnection,
    input: AppointmentInput,
) -> Result<AppointmentRecord, DomainError> {
    validate_new_appointment(&input)?;
    let master_id = input
        .master_id
        .ok_or_else(|| DomainError::Validation("master_id is required".into()))?;

    let txn = db.begin().await?;
    let master = resolve_master(&txn, master_id).await?;
    if let Some(ids) = &input.services {
        ensure_services_exist(&txn, ids).await?;
    }
    let date = input.date.map(|d| d.with_timezone(&Utc)).unwrap_or_else(Utc::now);
    let status = input
        .status
        .as_deref()
        .map(str::trim)
        .unwrap_or(appointment::DEFAULT_STATUS)
        .to_string();
    let created = appointment::ActiveModel {
        client_name: Set(input.client_name.as_deref().map(str::trim).unwrap_or_default().to_string()),
        client_phone: Set(input.client_phone.as_deref().map(str::trim).unwrap_or_default().to_string()),
        date: Set(date.into()),
        status: Set(status),
        comment: Set(optional_text(input.comment.as_deref())),
        master_id: Set(master_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    let service_ids = input.services.unwrap_or_default();
    appointment_service::insert_for_appointment(&txn, created.id, &service_ids).await?;
    txn.commit().await?;

    info!(appointment_id = created.id, master_id, services = service_ids.len(), "appointment created");
    Ok(AppointmentRecord { appointment: created, master, service_ids })
}

/// Apply the supplied fields. `services` replaces the links when present.
#[instrument(skip(db, input))]
pub async fn update_appointment(
    db: &DatabaseConnection,
    id: i32,
    input: AppointmentInput,
) -> Result<AppointmentRecord, DomainError> {
    validate_appointment_changes(&input)?;

    let txn = db.begin().await?;
    let existing = appointment::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("appointment", id))?;
    let master = resolve_master(&txn, input.master_id.unwrap_or(existing.master_id)).await?;

    let mut am: appointment::ActiveModel = existing.clone().into();
    if let Some(v) = input.client_name.as_deref() {
        am.client_name = Set(v.trim().to_string());
    }
    if let Some(v) = input.client_phone.as_deref() {
        am.client_phone = Set(v.trim().to_string());
    }
    if let Some(d) = input.date {
        am.date = Set(d.with_timezone(&Utc).into());
    }
    if let Some(v) = input.status.as_deref() {
        am.status = Set(v.trim().to_string());
    }
    if input.comment.is_some() {
        am.comment = Set(optional_text(input.comment.as_deref()));
    }
    if input.master_id.is_some() {
        am.master_id = Set(master.id);
    }
    let updated = if am.is_changed() { am.update(&txn).await? } else { existing };
    if let Some(ids) = &input.services {
        replace_appointment_services(&txn, id, ids).await?;
    }
    let service_ids = appointment_service::service_ids_for_appointment(&txn, id).await?;
    txn.commit().await?;

    info!(appointment_id = id, master_id = master.id, status = %updated.status, "appointment updated");
    Ok(AppointmentRecord { appointment: updated, master, service_ids })
}

/// Delete an appointment and its service links.
#[instrument(skip(db))]
pub async fn delete_appointment(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;
    if appointment::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(DomainError::not_found("appointment", id));
    }
    let links = appointment_service::delete_for_appointment(&txn, id).await?;
    appointment::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(appointment_id = id, links, "appointment deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_master, seed_service, setup_db};
    use chrono::{DateTime, FixedOffset, TimeZone};
    use sea_orm::PaginatorTrait;

    fn booking(client: &str, master_id: i32) -> AppointmentInput {
        AppointmentInput {
            client_name: Some(client.into()),
            client_phone: Some("555-0101".into()),
            master_id: Some(master_id),
            ..Default::default()
        }
    }

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[tokio::test]
    async fn create_applies_defaults() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let m = seed_master(&db, "Ivan", "Ivanov", "123-456-7890").await?;
        let before = Utc::now();
        let rec = create_appointment(&db, booking("Petr", m.id)).await?;
        assert_eq!(rec.appointment.status, "awaiting");
        assert_eq!(rec.appointment.comment, None);
        assert_eq!(rec.master.id, m.id);
        assert!(rec.service_ids.is_empty());
        assert!(rec.appointment.date.with_timezone(&Utc) >= before - chrono::Duration::seconds(1));
        Ok(())
    }

    #[tokio::test]
    async fn date_is_stored_in_utc() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let m = seed_master(&db, "Ivan", "Ivanov", "123-456-7890").await?;
        let mut input = booking("Petr", m.id);
        input.date = Some(at("2024-05-01T13:30:00+03:00"));
        let rec = create_appointment(&db, input).await?;
        let fetched = get_appointment(&db, rec.appointment.id).await?;
        assert_eq!(fetched.appointment.date.offset().local_minus_utc(), 0);
        assert_eq!(
            fetched.appointment.date.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
        );
        Ok(())
    }

    #[tokio::test]
    async fn short_phone_rejected_without_insert() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let m = seed_master(&db, "Ivan", "Ivanov", "123-456-7890").await?;
        let mut input = booking("Petr", m.id);
        input.client_phone = Some("123".into());
        let err = create_appointment(&db, input).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref msg) if msg.contains("client_phone")));
        assert_eq!(appointment::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_master_or_service_rejected_without_insert() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let err = create_appointment(&db, booking("Petr", 404)).await.unwrap_err();
        assert!(matches!(err, DomainError::UnknownReference(ref msg) if msg.contains("404")));

        let m = seed_master(&db, "Ivan", "Ivanov", "123-456-7890").await?;
        let mut input = booking("Petr", m.id);
        input.services = Some(vec![12]);
        let err = create_appointment(&db, input).await.unwrap_err();
        assert!(matches!(err, DomainError::UnknownReference(_)));
        assert_eq!(appointment::Entity::find().count(&db).await?, 0);
        assert_eq!(appointment_service::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn services_round_trip_in_order() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let m = seed_master(&db, "Ivan", "Ivanov", "123-456-7890").await?;
        let mut ids = Vec::new();
        let catalog = [("Haircut", "1000"), ("Shave", "800"), ("Styling", "1200"), ("Coloring", "1500")];
        for (title, price) in catalog {
            ids.push(seed_service(&db, title, price).await?.id);
        }
        let mut input = booking("Petr", m.id);
        input.services = Some(vec![ids[1], ids[3]]);
        let rec = create_appointment(&db, input).await?;
        assert_eq!(get_appointment(&db, rec.appointment.id).await?.service_ids, vec![ids[1], ids[3]]);

        let done = AppointmentInput { status: Some("done".into()), ..Default::default() };
        let untouched = update_appointment(&db, rec.appointment.id, done).await?;
        assert_eq!(untouched.appointment.status, "done");
        assert_eq!(untouched.service_ids, vec![ids[1], ids[3]]);

        let reordered = AppointmentInput { services: Some(vec![ids[3], ids[0]]), ..Default::default() };
        let reordered = update_appointment(&db, rec.appointment.id, reordered).await?;
        assert_eq!(reordered.service_ids, vec![ids[3], ids[0]]);

        let cleared = AppointmentInput { services: Some(vec![]), ..Default::default() };
        assert!(update_appointment(&db, rec.appointment.id, cleared).await?.service_ids.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_checks_master_and_existence() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let m1 = seed_master(&db, "Ivan", "Ivanov", "123-456-7890").await?;
        let m2 = seed_master(&db, "Anna", "Petrova", "987-654-3210").await?;
        let rec = create_appointment(&db, booking("Petr", m1.id)).await?;

        let to_m2 = AppointmentInput { master_id: Some(m2.id), ..Default::default() };
        let moved = update_appointment(&db, rec.appointment.id, to_m2).await?;
        assert_eq!(moved.appointment.master_id, m2.id);
        assert_eq!(moved.master.first_name, "Anna");

        let bad = AppointmentInput { master_id: Some(999), ..Default::default() };
        assert!(matches!(
            update_appointment(&db, rec.appointment.id, bad).await,
            Err(DomainError::UnknownReference(_))
        ));
        assert_eq!(get_appointment(&db, rec.appointment.id).await?.appointment.master_id, m2.id);

        assert!(matches!(
            update_appointment(&db, 999, AppointmentInput::default()).await,
            Err(DomainError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_links() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let m = seed_master(&db, "Ivan", "Ivanov", "123-456-7890").await?;
        let s = seed_service(&db, "Haircut", "1000").await?;
        let mut input = booking("Petr", m.id);
        input.services = Some(vec![s.id]);
        let rec = create_appointment(&db, input).await?;

        delete_appointment(&db, rec.appointment.id).await?;
        assert_eq!(appointment_service::Entity::find().count(&db).await?, 0);
        assert!(matches!(get_appointment(&db, rec.appointment.id).await, Err(DomainError::NotFound(_))));
        assert!(matches!(delete_appointment(&db, rec.appointment.id).await, Err(DomainError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_sorting_and_per_master() -> anyhow::Result<()> {
        let db = setup_db().await?;
        let m1 = seed_master(&db, "Ivan", "Ivanov", "123-456-7890").await?;
        let m2 = seed_master(&db, "Anna", "Petrova", "987-654-3210").await?;
        for (client, status, date, master_id) in [
            ("Boris", "done", "2024-05-03T10:00:00Z", m1.id),
            ("Alla", "awaiting", "2024-05-01T10:00:00Z", m2.id),
            ("Vera", "cancelled", "2024-05-02T10:00:00Z", m1.id),
        ] {
            let mut input = booking(client, master_id);
            input.status = Some(status.into());
            input.date = Some(at(date));
            create_appointment(&db, input).await?;
        }
        let clients = |v: Vec<AppointmentRecord>| {
            v.into_iter().map(|r| r.appointment.client_name).collect::<Vec<_>>()
        };

        let default = clients(list_appointments(&db, ListOptions::default()).await?);
        assert_eq!(default, vec!["Alla", "Vera", "Boris"]);
        let unknown = ListOptions::parse(Some("bogus"), Some("sideways"));
        let bogus = clients(list_appointments(&db, unknown).await?);
        assert_eq!(bogus, default);

        let by_status = list_appointments(&db, ListOptions::parse(Some("status"), Some("desc"))).await?;
        let statuses: Vec<String> = by_status.iter().map(|r| r.appointment.status.clone()).collect();
        assert!(statuses.windows(2).all(|w| w[0] >= w[1]));

        let by_client = clients(list_appointments(&db, ListOptions::parse(Some("client_name"), None)).await?);
        assert_eq!(by_client, vec!["Alla", "Boris", "Vera"]);

        let for_m1 = list_appointments_for_master(&db, m1.id).await?;
        assert_eq!(clients(for_m1.clone()), vec!["Vera", "Boris"]);
        assert!(for_m1.iter().all(|r| r.master.id == m1.id));
        assert!(matches!(list_appointments_for_master(&db, 999).await, Err(DomainError::NotFound(_))));
        Ok(())
    }
}
