use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HomeDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RoomDto {
    pub id: i32,
    pub home_id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AssetDetailsDto {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub model_number: String,
    /// True for the shipped catalog, false for user-made entries.
    pub stored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AssetDto {
    pub id: i32,
    pub room_id: i32,
    pub name: String,
    pub category: String,
    pub details: Option<AssetDetailsDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ConsumableDto {
    pub id: i32,
    pub asset_id: i32,
    pub details_id: Option<i32>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TaskDto {
    pub id: i32,
    pub name: String,
    pub interval: String,
    pub interval_label: String,
    pub room_id: Option<i32>,
    pub asset_id: Option<i32>,
    pub consumable_id: Option<i32>,
    pub next_due_date: Option<NaiveDate>,
    pub last_completed_date: Option<NaiveDate>,
    pub overdue: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LogDto {
    pub id: i32,
    pub task_id: i32,
    pub completion_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub cost: Option<Decimal>,
    pub notes: String,
}

/// A value/label pair for select inputs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChoiceDto {
    pub value: String,
    pub label: String,
}

/// Everything the dashboard shows for the current home.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardView {
    pub home: HomeDto,
    pub rooms: Vec<RoomDto>,
    /// `"all"` or the id of the room the listing is filtered to.
    pub selected_room_id: String,
    pub selected_asset_id: Option<i32>,
    pub assets: Vec<AssetDto>,
    pub consumables: Vec<ConsumableDto>,
    pub tasks: Vec<TaskDto>,
    pub due_soon_tasks: Vec<TaskDto>,
    pub logs: Vec<LogDto>,
    pub stored_brands: Vec<String>,
    pub stored_asset_details: Vec<AssetDetailsDto>,
    pub asset_choices: Vec<ChoiceDto>,
    pub task_choices: Vec<ChoiceDto>,
    pub interval_choices: Vec<ChoiceDto>,
    pub category_choices: Vec<ChoiceDto>,
}

/// The manage-homes page: every home of the user and the selected one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HomesView {
    pub homes: Vec<HomeDto>,
    pub current_home_id: i32,
}
