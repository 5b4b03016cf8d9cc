//! Lookups restricted to the current home or the current user.

use model::entities::{asset, consumable, home, home_user_connection, room, task};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
};

use super::ActionError;

pub async fn room<C: ConnectionTrait>(
    db: &C,
    home_id: i32,
    room_id: i32,
) -> Result<room::Model, ActionError> {
    room::Entity::find_by_id(room_id)
        .filter(room::Column::HomeId.eq(home_id))
        .one(db)
        .await?
        .ok_or_else(|| ActionError::not_found("Room was not found."))
}

pub async fn asset<C: ConnectionTrait>(
    db: &C,
    home_id: i32,
    asset_id: i32,
) -> Result<asset::Model, ActionError> {
    asset::Entity::find_by_id(asset_id)
        .inner_join(room::Entity)
        .filter(room::Column::HomeId.eq(home_id))
        .one(db)
        .await?
        .ok_or_else(|| ActionError::not_found("Asset was not found."))
}

pub async fn consumable<C: ConnectionTrait>(
    db: &C,
    home_id: i32,
    consumable_id: i32,
) -> Result<consumable::Model, ActionError> {
    consumable::Entity::find_by_id(consumable_id)
        .join(JoinType::InnerJoin, consumable::Relation::Asset.def())
        .join(JoinType::InnerJoin, asset::Relation::Room.def())
        .filter(room::Column::HomeId.eq(home_id))
        .one(db)
        .await?
        .ok_or_else(|| ActionError::not_found("Consumable was not found."))
}

pub async fn task<C: ConnectionTrait>(
    db: &C,
    home_id: i32,
    task_id: i32,
    missing: &str,
) -> Result<task::Model, ActionError> {
    task::Entity::find_by_id(task_id)
        .filter(task::Column::HomeId.eq(home_id))
        .one(db)
        .await?
        .ok_or_else(|| ActionError::not_found(missing))
}

/// A home the user is connected to.
pub async fn connected_home<C: ConnectionTrait>(
    db: &C,
    username: &str,
    home_id: i32,
) -> Result<home::Model, ActionError> {
    home::Entity::find_by_id(home_id)
        .join(JoinType::InnerJoin, home::Relation::HomeUserConnection.def())
        .filter(home_user_connection::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| ActionError::not_found("Home was not found."))
}
