//! Replace-all synchronization of the many-to-many link tables.
//!
//! Both functions take any connection so they can run inside the owner's
//! write transaction. On a plain connection each statement commits on its
//! own, so callers outside this crate should pass a transaction.

use models::{appointment, appointment_service, master, master_service, service};
use sea_orm::{ConnectionTrait, EntityTrait};
use tracing::{debug, instrument};

use crate::errors::DomainError;
use crate::validation::validate_service_ids;

/// Every id in `service_ids` must name an existing service.
pub(crate) async fn ensure_services_exist<C: ConnectionTrait>(
    db: &C,
    service_ids: &[i32],
) -> Result<(), DomainError> {
    let missing = service::missing_ids(db, service_ids).await?;
    if !missing.is_empty() {
        let list = missing.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ");
        return Err(DomainError::UnknownReference(format!("unknown service id(s): {}", list)));
    }
    Ok(())
}

/// Drop all of a master's service links and insert `service_ids` in order.
#[instrument(skip(db, service_ids), fields(count = service_ids.len()))]
pub async fn replace_master_services<C: ConnectionTrait>(
    db: &C,
    master_id: i32,
    service_ids: &[i32],
) -> Result<(), DomainError> {
    validate_service_ids(service_ids)?;
    if master::Entity::find_by_id(master_id).one(db).await?.is_none() {
        return Err(DomainError::not_found("master", master_id));
    }
    ensure_services_exist(db, service_ids).await?;
    let removed = master_service::delete_for_master(db, master_id).await?;
    master_service::insert_for_master(db, master_id, service_ids).await?;
    debug!(master_id, removed, inserted = service_ids.len(), "master services replaced");
    Ok(())
}

/// Drop all of an appointment's service links and insert `service_ids` in order.
#[instrument(skip(db, service_ids), fields(count = service_ids.len()))]
pub async fn replace_appointment_services<C: ConnectionTrait>(
    db: &C,
    appointment_id: i32,
    service_ids: &[i32],
) -> Result<(), DomainError> {
    validate_service_ids(service_ids)?;
    if appointment::Entity::find_by_id(appointment_id).one(db).await?.is_none() {
        return Err(DomainError::not_found("appointment", appointment_id));
    }
    ensure_services_exist(db, service_ids).await?;
    let removed = appointment_service::delete_for_appointment(db, appointment_id).await?;
    appointment_service::insert_for_appointment(db, appointment_id, service_ids).await?;
    debug!(appointment_id, removed, inserted = service_ids.len(), "appointment services replaced");
    Ok(())
}
