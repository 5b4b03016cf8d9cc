//! Read side of the dashboard and manage-homes pages.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use common::{
    AssetDetailsDto, AssetDto, ChoiceDto, ConsumableDto, DashboardView, HomeDto, HomesView,
    LogDto, RoomDto, TaskDto,
};
use compute::{DUE_SOON_LIMIT, due_soon, is_overdue};
use model::entities::{
    asset, asset::AssetCategory, asset_details, consumable, home, home_user_connection, log,
    room, task, task::TaskInterval,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Iterable,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{debug, info, trace};
use utoipa::IntoParams;

use crate::actions::{ValidationError, fields};
use crate::auth::DEFAULT_HOME_NAME;

/// Narrows the dashboard to one room or one asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub room: Option<i32>,
    pub asset: Option<i32>,
}

impl ListingFilter {
    pub fn room(room_id: i32) -> Self {
        Self {
            room: Some(room_id),
            asset: None,
        }
    }

    pub fn asset(asset_id: i32) -> Self {
        Self {
            room: None,
            asset: Some(asset_id),
        }
    }

    /// Query string form, e.g. `?room=3`.
    pub fn query_string(&self) -> String {
        match (self.room, self.asset) {
            (Some(room), Some(asset)) => format!("?room={}&asset={}", room, asset),
            (Some(room), None) => format!("?room={}", room),
            (None, Some(asset)) => format!("?asset={}", asset),
            (None, None) => String::new(),
        }
    }
}

/// Query parameters of the dashboard. `all` or empty means no filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DashboardQuery {
    /// Room id, or `all`
    pub room: Option<String>,
    /// Asset id, or `all`
    pub asset: Option<String>,
}

impl TryFrom<&DashboardQuery> for ListingFilter {
    type Error = ValidationError;

    fn try_from(query: &DashboardQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            room: fields::optional_id(&query.room, "Room")?,
            asset: fields::optional_id(&query.asset, "Asset")?,
        })
    }
}

/// Homes the user is connected to, oldest first.
pub async fn user_homes(db: &DatabaseConnection, username: &str) -> Result<Vec<home::Model>, DbErr> {
    let home_ids: Vec<i32> = home_user_connection::Entity::find()
        .filter(home_user_connection::Column::Username.eq(username))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.home_id)
        .collect();

    home::Entity::find()
        .filter(home::Column::Id.is_in(home_ids))
        .order_by_asc(home::Column::Id)
        .all(db)
        .await
}

/// Resolves the home a request works on.
///
/// The session's home wins if the user is still connected to it, otherwise
/// the user's first home. A user without any home gets a fresh default one.
pub async fn current_home(
    db: &DatabaseConnection,
    username: &str,
    preferred: Option<i32>,
) -> Result<home::Model, DbErr> {
    let homes = user_homes(db, username).await?;

    if let Some(home) = preferred.and_then(|id| homes.iter().find(|h| h.id == id)) {
        return Ok(home.clone());
    }
    if let Some(home) = homes.into_iter().next() {
        trace!("Falling back to first home {} of {}", home.id, username);
        return Ok(home);
    }

    let txn = db.begin().await?;
    let home = home::ActiveModel {
        name: Set(DEFAULT_HOME_NAME.to_string()),
        address: Set(String::new()),
        city: Set(String::new()),
        state: Set(String::new()),
        zip_code: Set(String::new()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    home_user_connection::ActiveModel {
        username: Set(username.to_string()),
        home_id: Set(home.id),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!("Created default home {} for {}", home.id, username);
    Ok(home)
}

fn home_dto(home: &home::Model) -> HomeDto {
    HomeDto {
        id: home.id,
        name: home.name.clone(),
        address: home.address.clone(),
        city: home.city.clone(),
        state: home.state.clone(),
        zip_code: home.zip_code.clone(),
    }
}

fn details_dto(details: &asset_details::Model) -> AssetDetailsDto {
    AssetDetailsDto {
        id: details.id,
        name: details.name.clone(),
        brand: details.brand.clone(),
        model_number: details.model_number.clone(),
        stored: details.is_stored(),
    }
}

fn task_dto(task: &task::Model, today: NaiveDate) -> TaskDto {
    TaskDto {
        id: task.id,
        name: task.name.clone(),
        interval: task.interval.as_tag().to_string(),
        interval_label: task.interval.label().to_string(),
        room_id: task.room_id,
        asset_id: task.asset_id,
        consumable_id: task.consumable_id,
        next_due_date: task.next_due_date,
        last_completed_date: task.last_completed_date,
        overdue: is_overdue(task, today),
    }
}

pub async fn homes_view(
    db: &DatabaseConnection,
    username: &str,
    current_home_id: i32,
) -> Result<HomesView, DbErr> {
    let homes = user_homes(db, username).await?;
    Ok(HomesView {
        homes: homes.iter().map(home_dto).collect(),
        current_home_id,
    })
}

/// Builds the dashboard of a home.
///
/// A room filter keeps the assets of that room and the tasks placed in it or
/// on one of its assets. An asset filter keeps the tasks of that asset; the
/// asset list stays complete so another asset can be picked.
pub async fn dashboard_view(
    db: &DatabaseConnection,
    home: &home::Model,
    filter: ListingFilter,
    today: NaiveDate,
) -> Result<DashboardView, DbErr> {
    let rooms = room::Entity::find()
        .filter(room::Column::HomeId.eq(home.id))
        .order_by_asc(room::Column::Id)
        .all(db)
        .await?;
    let room_ids: Vec<i32> = rooms.iter().map(|r| r.id).collect();

    let home_assets = asset::Entity::find()
        .filter(asset::Column::RoomId.is_in(room_ids))
        .order_by_asc(asset::Column::Id)
        .find_also_related(asset_details::Entity)
        .all(db)
        .await?;
    let home_asset_ids: Vec<i32> = home_assets.iter().map(|(a, _)| a.id).collect();

    let home_tasks = task::Entity::find()
        .filter(task::Column::HomeId.eq(home.id))
        .order_by_asc(task::Column::Id)
        .all(db)
        .await?;

    let (assets, tasks): (Vec<_>, Vec<_>) = match filter {
        ListingFilter {
            room: Some(room_id),
            ..
        } => {
            let in_room: Vec<_> = home_assets
                .iter()
                .filter(|(a, _)| a.room_id == room_id)
                .cloned()
                .collect();
            let asset_ids: Vec<i32> = in_room.iter().map(|(a, _)| a.id).collect();
            let tasks = home_tasks
                .iter()
                .filter(|t| {
                    t.room_id == Some(room_id)
                        || t.asset_id.is_some_and(|id| asset_ids.contains(&id))
                })
                .cloned()
                .collect();
            (in_room, tasks)
        }
        ListingFilter {
            asset: Some(asset_id),
            ..
        } => {
            let tasks = home_tasks
                .iter()
                .filter(|t| t.asset_id == Some(asset_id))
                .cloned()
                .collect();
            (home_assets.clone(), tasks)
        }
        _ => (home_assets.clone(), home_tasks.clone()),
    };
    debug!(
        "Dashboard for home {} with {:?}: {} assets, {} tasks",
        home.id,
        filter,
        assets.len(),
        tasks.len()
    );

    let task_ids: Vec<i32> = tasks.iter().map(|t| t.id).collect();
    let logs = log::Entity::find()
        .filter(log::Column::TaskId.is_in(task_ids))
        .order_by_desc(log::Column::CompletionDate)
        .order_by_desc(log::Column::Id)
        .all(db)
        .await?;

    let consumables = consumable::Entity::find()
        .filter(consumable::Column::AssetId.is_in(home_asset_ids))
        .order_by_asc(consumable::Column::Id)
        .all(db)
        .await?;

    let stored_details = asset_details::Entity::find()
        .filter(asset_details::Column::Owner.is_null())
        .order_by_asc(asset_details::Column::Brand)
        .order_by_asc(asset_details::Column::Name)
        .all(db)
        .await?;
    let stored_brands: BTreeSet<String> =
        stored_details.iter().map(|d| d.brand.clone()).collect();

    let asset_names: HashMap<i32, &str> = home_assets
        .iter()
        .map(|(a, _)| (a.id, a.name.as_str()))
        .collect();

    let due = due_soon(&tasks, DUE_SOON_LIMIT);

    Ok(DashboardView {
        home: home_dto(home),
        rooms: rooms
            .iter()
            .map(|r| RoomDto {
                id: r.id,
                home_id: r.home_id,
                name: r.name.clone(),
                description: r.description.clone(),
            })
            .collect(),
        selected_room_id: filter
            .room
            .map(|id| id.to_string())
            .unwrap_or_else(|| "all".to_string()),
        selected_asset_id: filter.asset,
        assets: assets
            .iter()
            .map(|(a, details)| AssetDto {
                id: a.id,
                room_id: a.room_id,
                name: a.name.clone(),
                category: a.category.as_tag().to_string(),
                details: details.as_ref().map(details_dto),
            })
            .collect(),
        consumables: consumables
            .iter()
            .map(|c| ConsumableDto {
                id: c.id,
                asset_id: c.asset_id,
                details_id: c.details_id,
                name: c.name.clone(),
            })
            .collect(),
        tasks: tasks.iter().map(|t| task_dto(t, today)).collect(),
        due_soon_tasks: due.iter().map(|t| task_dto(t, today)).collect(),
        logs: logs
            .iter()
            .map(|l| LogDto {
                id: l.id,
                task_id: l.task_id,
                completion_date: l.completion_date,
                cost: l.cost,
                notes: l.notes.clone(),
            })
            .collect(),
        stored_brands: stored_brands.into_iter().collect(),
        stored_asset_details: stored_details.iter().map(details_dto).collect(),
        asset_choices: home_assets
            .iter()
            .map(|(a, _)| ChoiceDto {
                value: a.id.to_string(),
                label: a.name.clone(),
            })
            .collect(),
        task_choices: home_tasks
            .iter()
            .map(|t| ChoiceDto {
                value: t.id.to_string(),
                label: match t.asset_id.and_then(|id| asset_names.get(&id)) {
                    Some(asset) => format!("{} ({})", t.name, asset),
                    None => t.name.clone(),
                },
            })
            .collect(),
        interval_choices: TaskInterval::iter()
            .map(|i| ChoiceDto {
                value: i.as_tag().to_string(),
                label: i.label().to_string(),
            })
            .collect(),
        category_choices: AssetCategory::iter()
            .map(|c| ChoiceDto {
                value: c.as_tag().to_string(),
                label: c.label().to_string(),
            })
            .collect(),
    })
}
