use std::collections::HashMap;

use sea_orm::{entity::prelude::*, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{master, service};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "master_service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub master_id: i32,
    pub service_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Master,
    Service,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Master => Entity::belongs_to(master::Entity)
                .from(Column::MasterId)
                .to(master::Column::Id)
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

impl Related<master::Entity> for Entity {
    fn to() -> RelationDef { Relation::Master.def() }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Service ids linked to a master, in link insertion order.
pub async fn service_ids_for_master<C: ConnectionTrait>(
    db: &C,
    master_id: i32,
) -> Result<Vec<i32>, ModelError> {
    Ok(Entity::find()
        .filter(Column::MasterId.eq(master_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.service_id)
        .collect())
}

/// Same as [`service_ids_for_master`] for many masters in one query.
/// Masters without links are absent from the map.
pub async fn service_ids_for_masters<C: ConnectionTrait>(
    db: &C,
    master_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, ModelError> {
    let mut out: HashMap<i32, Vec<i32>> = HashMap::new();
    if master_ids.is_empty() {
        return Ok(out);
    }
    let links = Entity::find()
        .filter(Column::MasterId.is_in(master_ids.iter().copied()))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    for l in links {
        out.entry(l.master_id).or_default().push(l.service_id);
    }
    Ok(out)
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

/// Insert one link per service id, preserving order.
pub async fn insert_for_master<C: ConnectionTrait>(
    db: &C,
    master_id: i32,
    service_ids: &[i32],
) -> Result<(), ModelError> {
    for &service_id in service_ids {
        let link = ActiveModel {
            master_id: Set(master_id),
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
