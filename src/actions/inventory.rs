//! Rooms, assets and consumables of the current home.

use compute::next_due_date;
use model::entities::{asset, asset_details, consumable, consumable_details, room, task};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, trace};

use super::{ActionContext, ActionError, ActionOutcome, AssetFields, Schedule, ValidationError, scope};
use crate::listing::ListingFilter;

pub async fn add_room(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    name: String,
    description: String,
) -> Result<ActionOutcome, ActionError> {
    let room = room::ActiveModel {
        home_id: Set(ctx.home.id),
        name: Set(name),
        description: Set(description),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!("Created room {} in home {}", room.id, ctx.home.id);
    Ok(ActionOutcome::done("Room added for you to organize."))
}

/// Room for a new asset: the one picked on the form, else the room the
/// dashboard is showing, else the first room of the home.
async fn placement_room(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    picked: Option<i32>,
) -> Result<room::Model, ActionError> {
    if let Some(room_id) = picked.or(ctx.selected_room) {
        return scope::room(db, ctx.home.id, room_id).await;
    }

    room::Entity::find()
        .filter(room::Column::HomeId.eq(ctx.home.id))
        .order_by_asc(room::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| ValidationError::new("Create a room first to place assets.").into())
}

pub async fn add_stored_asset(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    fields: AssetFields,
) -> Result<ActionOutcome, ActionError> {
    let room = placement_room(db, ctx, fields.room_id).await?;

    let details = asset_details::Entity::find()
        .filter(asset_details::Column::Owner.is_null())
        .filter(asset_details::Column::Name.eq(fields.name.as_str()))
        .filter(asset_details::Column::Brand.eq(fields.brand.as_str()))
        .filter(asset_details::Column::ModelNumber.eq(fields.model_number.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| ActionError::not_found("That asset is not in the stored catalog."))?;

    let asset = asset::ActiveModel {
        room_id: Set(room.id),
        details_id: Set(Some(details.id)),
        name: Set(fields.name),
        category: Set(fields.category),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!("Placed stored asset {} (details {}) in room {}", asset.id, details.id, room.id);
    Ok(ActionOutcome::done("Asset added to the room."))
}

pub async fn add_custom_asset(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    fields: AssetFields,
) -> Result<ActionOutcome, ActionError> {
    let room = placement_room(db, ctx, fields.room_id).await?;

    let txn = db.begin().await?;
    let details = asset_details::ActiveModel {
        name: Set(fields.name.clone()),
        brand: Set(fields.brand),
        model_number: Set(fields.model_number),
        owner: Set(Some(ctx.username.to_string())),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let asset = asset::ActiveModel {
        room_id: Set(room.id),
        details_id: Set(Some(details.id)),
        name: Set(fields.name),
        category: Set(fields.category),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    debug!("Placed custom asset {} in room {}", asset.id, room.id);
    Ok(ActionOutcome::done("Asset added to the room."))
}

/// Adds a consumable to an asset. With a schedule, a replacement task is
/// created alongside it.
pub async fn add_consumable(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    name: String,
    brand: String,
    part_number: String,
    asset_id: i32,
    schedule: Option<Schedule>,
) -> Result<ActionOutcome, ActionError> {
    let asset = scope::asset(db, ctx.home.id, asset_id).await?;

    let txn = db.begin().await?;
    let details = consumable_details::ActiveModel {
        name: Set(name.clone()),
        brand: Set(brand),
        part_number: Set(part_number),
        owner: Set(Some(ctx.username.to_string())),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let consumable = consumable::ActiveModel {
        asset_id: Set(asset.id),
        details_id: Set(Some(details.id)),
        name: Set(name.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(schedule) = schedule {
        let task = task::ActiveModel {
            home_id: Set(ctx.home.id),
            room_id: Set(Some(asset.room_id)),
            asset_id: Set(Some(asset.id)),
            consumable_id: Set(Some(consumable.id)),
            name: Set(format!("Replace {}", name)),
            interval: Set(schedule.interval),
            last_completed_date: Set(Some(schedule.start_date)),
            next_due_date: Set(Some(next_due_date(schedule.interval, schedule.start_date))),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        trace!("Scheduled replacement task {}", task.id);
    }
    txn.commit().await?;

    Ok(ActionOutcome::done("Consumable added to the asset."))
}

pub async fn delete_room(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    room_id: i32,
) -> Result<ActionOutcome, ActionError> {
    let room = scope::room(db, ctx.home.id, room_id).await?;
    room.delete(db).await?;
    Ok(ActionOutcome::done("Room was deleted."))
}

pub async fn delete_asset(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    asset_id: i32,
) -> Result<ActionOutcome, ActionError> {
    let asset = scope::asset(db, ctx.home.id, asset_id).await?;
    asset.delete(db).await?;
    Ok(ActionOutcome::done("Asset was deleted."))
}

pub async fn sort_room(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    room_id: i32,
) -> Result<ActionOutcome, ActionError> {
    let room = scope::room(db, ctx.home.id, room_id).await?;
    Ok(ActionOutcome {
        filter: Some(ListingFilter::room(room.id)),
        ..ActionOutcome::done(format!("Showing {}.", room.name))
    })
}

pub async fn sort_asset(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    asset_id: i32,
) -> Result<ActionOutcome, ActionError> {
    let asset = scope::asset(db, ctx.home.id, asset_id).await?;
    Ok(ActionOutcome {
        filter: Some(ListingFilter::asset(asset.id)),
        ..ActionOutcome::done(format!("Showing {}.", asset.name))
    })
}
