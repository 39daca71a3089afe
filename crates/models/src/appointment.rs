use sea_orm::{entity::prelude::*, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{appointment_service, master};

/// Status given to bookings created without one.
pub const DEFAULT_STATUS: &str = "awaiting";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_name: String,
    pub client_phone: String,
    pub date: DateTimeWithTimeZone,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub master_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Master,
    AppointmentService,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Master => Entity::belongs_to(master::Entity)
                .from(Column::MasterId)
                .to(master::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::AppointmentService => Entity::has_many(appointment_service::Entity).into(),
        }
    }
}

impl Related<master::Entity> for Entity {
    fn to() -> RelationDef { Relation::Master.def() }
}

impl Related<appointment_service::Entity> for Entity {
    fn to() -> RelationDef { Relation::AppointmentService.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Ids of every appointment owned by `master_id`.
pub async fn ids_for_master<C: ConnectionTrait>(
    db: &C,
    master_id: i32,
) -> Result<Vec<i32>, ModelError> {
    Ok(Entity::find()
        .filter(Column::MasterId.eq(master_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect())
}

pub async fn delete_for_master<C: ConnectionTrait>(
    db: &C,
    master_id: i32,
) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::MasterId.eq(master_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
