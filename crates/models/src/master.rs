use sea_orm::{entity::prelude::*, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{appointment, master_service};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "master")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    #[sea_orm(unique)]
    pub phone: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Appointment,
    MasterService,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Appointment => Entity::has_many(appointment::Entity).into(),
            Relation::MasterService => Entity::has_many(master_service::Entity).into(),
        }
    }
}

impl Related<appointment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Appointment.def() }
}

impl Related<master_service::Entity> for Entity {
    fn to() -> RelationDef { Relation::MasterService.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_phone<C: ConnectionTrait>(
    db: &C,
    phone: &str,
) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Phone.eq(phone)).one(db).await?)
}

/// All masters whose id is in `ids`, ordered by id.
pub async fn find_many<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<Vec<Model>, ModelError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Entity::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
