use std::collections::HashMap;

use sea_orm::{entity::prelude::*, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{appointment, service};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment_service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub appointment_id: i32,
    pub service_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Appointment,
    Service,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Appointment => Entity::belongs_to(appointment::Entity)
                .from(Column::AppointmentId)
                .to(appointment::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Service => Entity::belongs_to(service::Entity)
                .from(Column::ServiceId)
                .to(service::Column::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .into(),
        }
    }
}

impl Related<appointment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Appointment.def() }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn service_ids_for_appointment<C: ConnectionTrait>(
    db: &C,
    appointment_id: i32,
) -> Result<Vec<i32>, ModelError> {
    Ok(Entity::find()
        .filter(Column::AppointmentId.eq(appointment_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.service_id)
        .collect())
}

pub async fn service_ids_for_appointments<C: ConnectionTrait>(
    db: &C,
    appointment_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, ModelError> {
    let mut out: HashMap<i32, Vec<i32>> = HashMap::new();
    if appointment_ids.is_empty() {
        return Ok(out);
    }
    let links = Entity::find()
        .filter(Column::AppointmentId.is_in(appointment_ids.iter().copied()))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    for l in links {
        out.entry(l.appointment_id).or_default().push(l.service_id);
    }
    Ok(out)
}

pub async fn delete_for_appointment<C: ConnectionTrait>(
    db: &C,
    appointment_id: i32,
) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::AppointmentId.eq(appointment_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_for_appointments<C: ConnectionTrait>(
    db: &C,
    appointment_ids: &[i32],
) -> Result<u64, ModelError> {
    if appointment_ids.is_empty() {
        return Ok(0);
    }
    let res = Entity::delete_many()
        .filter(Column::AppointmentId.is_in(appointment_ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn insert_for_appointment<C: ConnectionTrait>(
    db: &C,
    appointment_id: i32,
    service_ids: &[i32],
) -> Result<(), ModelError> {
    for &service_id in service_ids {
        let link = ActiveModel {
            appointment_id: Set(appointment_id),
            service_id: Set(service_id),
            ..Default::default()
        };
        link.insert(db).await?;
    }
    Ok(())
}

pub async fn count_for_service<C: ConnectionTrait>(
    db: &C,
    service_id: i32,
) -> Result<u64, ModelError> {
    Ok(Entity::find()
        .filter(Column::ServiceId.eq(service_id))
        .count(db)
        .await?)
}
