//! Dashboard and manage-homes form actions.
//!
//! A submitted [`ActionRequest`] is first turned into a typed [`Command`]
//! (all presence and format checks happen there), then executed against the
//! current home. Every lookup is scoped to that home so ids belonging to
//! somebody else behave exactly like ids that do not exist.

use chrono::NaiveDate;
use common::{ActionRequest, FlashMessage};
use model::entities::{asset::AssetCategory, home, task::TaskInterval};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::{debug, info, instrument};

pub mod fields;
mod homes;
mod inventory;
mod scope;
mod tasks;

use crate::listing::ListingFilter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ActionError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Text safe to show to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.message.clone(),
            Self::NotFound(message) => message.clone(),
            Self::Database(_) => "Something went wrong, please try again.".to_string(),
        }
    }
}

/// Name, address and location of a home as entered on the manage-homes form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeFields {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Brand, model number and category shared by both ways of adding an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFields {
    pub name: String,
    pub brand: String,
    pub model_number: String,
    pub category: AssetCategory,
    pub room_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub interval: TaskInterval,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddRoom {
        name: String,
        description: String,
    },
    /// Places an asset backed by a stored catalog entry.
    AddAsset(AssetFields),
    /// Places an asset with details owned by the current user.
    AddCustomAsset(AssetFields),
    AddConsumable {
        name: String,
        brand: String,
        part_number: String,
        asset_id: i32,
        schedule: Option<Schedule>,
    },
    AddTask {
        name: String,
        schedule: Schedule,
        asset_id: Option<i32>,
        room_id: Option<i32>,
        consumable_id: Option<i32>,
    },
    AddLog {
        task_id: i32,
        completion_date: Option<NaiveDate>,
        cost: Option<Decimal>,
        notes: String,
    },
    DeleteTask {
        task_id: i32,
    },
    DeleteRoom {
        room_id: i32,
    },
    DeleteAsset {
        asset_id: i32,
    },
    SortRoom {
        room_id: i32,
    },
    SortAsset {
        asset_id: i32,
    },
    SwitchHome {
        home_id: i32,
    },
    UpdateHome {
        home_id: i32,
        fields: HomeFields,
    },
    AddHome(HomeFields),
    DeleteHome {
        home_id: i32,
    },
}

const TASK_FIELDS_REQUIRED: &str = "Task name and start date are required.";

fn home_fields(
    name: &Option<String>,
    address: &Option<String>,
    city: &Option<String>,
    state: &Option<String>,
    zip: &Option<String>,
) -> Result<HomeFields, ValidationError> {
    Ok(HomeFields {
        name: fields::required_text(name, "Please give the home a name.")?,
        address: fields::text(address),
        city: fields::text(city),
        state: fields::state_code(state)?,
        zip_code: fields::zip_code(zip)?,
    })
}

fn asset_fields(
    name: &Option<String>,
    brand: &Option<String>,
    model_number: &Option<String>,
    category: &Option<String>,
    room: &Option<String>,
) -> Result<AssetFields, ValidationError> {
    Ok(AssetFields {
        name: fields::required_text(name, "Asset name is required.")?,
        brand: fields::text(brand),
        model_number: fields::text(model_number),
        category: AssetCategory::from_tag(&fields::text(category)),
        room_id: fields::optional_id(room, "Room")?,
    })
}

impl TryFrom<ActionRequest> for Command {
    type Error = ValidationError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        let command = match request {
            ActionRequest::AddRoom {
                room_name,
                room_description,
            } => Command::AddRoom {
                name: fields::required_text(&room_name, "Room name is required.")?,
                description: fields::text(&room_description),
            },
            ActionRequest::AddAsset {
                asset_name,
                asset_brand,
                asset_model_number,
                asset_category,
                asset_room,
            } => Command::AddAsset(asset_fields(
                &asset_name,
                &asset_brand,
                &asset_model_number,
                &asset_category,
                &asset_room,
            )?),
            ActionRequest::AddCustomAsset {
                asset_name,
                asset_brand,
                asset_model_number,
                asset_category,
                asset_room,
            } => Command::AddCustomAsset(asset_fields(
                &asset_name,
                &asset_brand,
                &asset_model_number,
                &asset_category,
                &asset_room,
            )?),
            ActionRequest::AddConsumable {
                consumable_name,
                consumable_brand,
                consumable_part_number,
                consumable_asset,
                consumable_interval,
                consumable_start_date,
            } => {
                let interval = fields::text(&consumable_interval);
                // A replacement schedule needs both an interval and a start date.
                let schedule = match fields::optional_date(&consumable_start_date, "Start date")? {
                    Some(start_date) if !interval.is_empty() => Some(Schedule {
                        interval: TaskInterval::from_tag(&interval),
                        start_date,
                    }),
                    _ => None,
                };
                Command::AddConsumable {
                    name: fields::required_text(
                        &consumable_name,
                        "Please provide a consumable name.",
                    )?,
                    brand: fields::text(&consumable_brand),
                    part_number: fields::text(&consumable_part_number),
                    asset_id: fields::required_id(
                        &consumable_asset,
                        "Pick the asset this consumable belongs to.",
                    )?,
                    schedule,
                }
            }
            ActionRequest::AddTask {
                task_name,
                task_interval,
                task_start_date,
                task_asset,
                task_room,
                task_consumable,
            } => Command::AddTask {
                name: fields::required_text(&task_name, TASK_FIELDS_REQUIRED)?,
                schedule: Schedule {
                    interval: TaskInterval::from_tag(&fields::text(&task_interval)),
                    start_date: fields::optional_date(&task_start_date, "Start date")?
                        .ok_or_else(|| ValidationError::new(TASK_FIELDS_REQUIRED))?,
                },
                asset_id: fields::optional_id(&task_asset, "Asset")?,
                room_id: fields::optional_id(&task_room, "Room")?,
                consumable_id: fields::optional_id(&task_consumable, "Consumable")?,
            },
            ActionRequest::AddLog {
                log_task,
                log_completion_date,
                log_cost,
                log_notes,
            } => Command::AddLog {
                task_id: fields::required_id(&log_task, "Pick a valid task for the log.")?,
                completion_date: fields::optional_date(&log_completion_date, "Completion date")?,
                cost: fields::optional_cost(&log_cost)?,
                notes: fields::text(&log_notes),
            },
            ActionRequest::DeleteTask { task_id } => Command::DeleteTask {
                task_id: fields::required_id(&task_id, "Pick a task to delete.")?,
            },
            ActionRequest::DeleteRoom { room_id } => Command::DeleteRoom {
                room_id: fields::required_id(&room_id, "Pick a room to delete.")?,
            },
            ActionRequest::DeleteAsset { asset_id } => Command::DeleteAsset {
                asset_id: fields::required_id(&asset_id, "Pick an asset to delete.")?,
            },
            ActionRequest::SortRoom { room_id } => Command::SortRoom {
                room_id: fields::required_id(&room_id, "Pick a room.")?,
            },
            ActionRequest::SortAsset { asset_id } => Command::SortAsset {
                asset_id: fields::required_id(&asset_id, "Pick an asset.")?,
            },
            ActionRequest::SwitchHome { home_id } => Command::SwitchHome {
                home_id: fields::required_id(&home_id, "Pick a home.")?,
            },
            ActionRequest::UpdateHome {
                home_id,
                home_name,
                home_address,
                home_city,
                home_state,
                home_zip,
            } => Command::UpdateHome {
                home_id: fields::required_id(&home_id, "Pick a home to update.")?,
                fields: home_fields(&home_name, &home_address, &home_city, &home_state, &home_zip)?,
            },
            ActionRequest::AddHome {
                home_name,
                home_address,
                home_city,
                home_state,
                home_zip,
            } => Command::AddHome(home_fields(
                &home_name,
                &home_address,
                &home_city,
                &home_state,
                &home_zip,
            )?),
            ActionRequest::DeleteHome { home_id } => Command::DeleteHome {
                home_id: fields::required_id(&home_id, "Pick a home to delete.")?,
            },
        };
        Ok(command)
    }
}

/// Who is acting, on which home, and which room the dashboard had selected.
#[derive(Debug, Clone)]
pub struct ActionContext<'a> {
    pub username: &'a str,
    pub home: &'a home::Model,
    pub selected_room: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub message: FlashMessage,
    /// Set by the sort actions.
    pub filter: Option<ListingFilter>,
    /// Set when the session should move to another home.
    pub current_home: Option<i32>,
}

impl ActionOutcome {
    fn done(message: impl Into<String>) -> Self {
        Self {
            message: FlashMessage::success(message),
            filter: None,
            current_home: None,
        }
    }
}

#[instrument(skip(db, ctx), fields(user = ctx.username, home = ctx.home.id))]
pub async fn execute(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    command: Command,
) -> Result<ActionOutcome, ActionError> {
    debug!("Executing {:?}", command);
    let outcome = match command {
        Command::AddRoom { name, description } => {
            inventory::add_room(db, ctx, name, description).await?
        }
        Command::AddAsset(fields) => inventory::add_stored_asset(db, ctx, fields).await?,
        Command::AddCustomAsset(fields) => inventory::add_custom_asset(db, ctx, fields).await?,
        Command::AddConsumable {
            name,
            brand,
            part_number,
            asset_id,
            schedule,
        } => {
            inventory::add_consumable(db, ctx, name, brand, part_number, asset_id, schedule)
                .await?
        }
        Command::DeleteRoom { room_id } => inventory::delete_room(db, ctx, room_id).await?,
        Command::DeleteAsset { asset_id } => inventory::delete_asset(db, ctx, asset_id).await?,
        Command::SortRoom { room_id } => inventory::sort_room(db, ctx, room_id).await?,
        Command::SortAsset { asset_id } => inventory::sort_asset(db, ctx, asset_id).await?,
        Command::AddTask {
            name,
            schedule,
            asset_id,
            room_id,
            consumable_id,
        } => tasks::add_task(db, ctx, name, schedule, asset_id, room_id, consumable_id).await?,
        Command::AddLog {
            task_id,
            completion_date,
            cost,
            notes,
        } => tasks::add_log(db, ctx, task_id, completion_date, cost, notes).await?,
        Command::DeleteTask { task_id } => tasks::delete_task(db, ctx, task_id).await?,
        Command::SwitchHome { home_id } => homes::switch_home(db, ctx, home_id).await?,
        Command::UpdateHome { home_id, fields } => {
            homes::update_home(db, ctx, home_id, fields).await?
        }
        Command::AddHome(fields) => homes::add_home(db, ctx, fields).await?,
        Command::DeleteHome { home_id } => homes::delete_home(db, ctx, home_id).await?,
    };
    info!("{}", outcome.message.text);
    Ok(outcome)
}
