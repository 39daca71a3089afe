use std::collections::HashSet;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{appointment_service, master_service};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((7, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    MasterService,
    AppointmentService,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::MasterService => Entity::has_many(master_service::Entity).into(),
            Relation::AppointmentService => Entity::has_many(appointment_service::Entity).into(),
        }
    }
}

impl Related<master_service::Entity> for Entity {
    fn to() -> RelationDef { Relation::MasterService.def() }
}

impl Related<appointment_service::Entity> for Entity {
    fn to() -> RelationDef { Relation::AppointmentService.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_title<C: ConnectionTrait>(
    db: &C,
    title: &str,
) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Title.eq(title)).one(db).await?)
}

/// Ids from `ids` that have no service row, in the order given.
pub async fn missing_ids<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<Vec<i32>, ModelError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let found: HashSet<i32> = Entity::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}
