//! Raw record browser for operators.
//!
//! Routes answer 404 unless an admin token is configured, and 401 unless the
//! request carries it in the `x-admin-token` header.

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use common::ApiResponse;
use model::entities::{
    app_user, asset, asset_details, consumable, consumable_details, diy_project, home,
    home_user_connection, log, project_step, room, task,
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PrimaryKeyTrait};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{HandlerError, internal_error};
use crate::schemas::{AppState, ErrorResponse};

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminEntity {
    AppUsers,
    Homes,
    HomeUserConnections,
    Rooms,
    AssetDetails,
    Assets,
    ConsumableDetails,
    Consumables,
    Tasks,
    Logs,
    DiyProjects,
    ProjectSteps,
}

impl FromStr for AdminEntity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "app-users" => Self::AppUsers,
            "homes" => Self::Homes,
            "home-user-connections" => Self::HomeUserConnections,
            "rooms" => Self::Rooms,
            "asset-details" => Self::AssetDetails,
            "assets" => Self::Assets,
            "consumable-details" => Self::ConsumableDetails,
            "consumables" => Self::Consumables,
            "tasks" => Self::Tasks,
            "logs" => Self::Logs,
            "diy-projects" => Self::DiyProjects,
            "project-steps" => Self::ProjectSteps,
            _ => return Err(()),
        })
    }
}

fn not_found(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("NOT_FOUND", message)),
    )
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), HandlerError> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Err(not_found("Not found"));
    };

    let given = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if given == Some(expected) {
        Ok(())
    } else {
        warn!("Rejected admin request with missing or wrong token");
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("ADMIN_TOKEN_REQUIRED", "Admin token required")),
        ))
    }
}

fn parse_entity(name: &str) -> Result<AdminEntity, HandlerError> {
    name.parse()
        .map_err(|_| not_found(format!("Unknown entity '{}'", name)))
}

fn parse_id(raw: &str) -> Result<i32, HandlerError> {
    raw.parse()
        .map_err(|_| not_found(format!("No record with id '{}'", raw)))
}

async fn list_json<E: EntityTrait>(db: &DatabaseConnection) -> Result<Vec<Value>, DbErr> {
    E::find().into_json().all(db).await
}

async fn get_json<E, K>(db: &DatabaseConnection, id: K) -> Result<Option<Value>, DbErr>
where
    E: EntityTrait,
    K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id).into_json().one(db).await
}

async fn delete_json<E, K>(db: &DatabaseConnection, id: K) -> Result<u64, DbErr>
where
    E: EntityTrait,
    K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    Ok(E::delete_by_id(id).exec(db).await?.rows_affected)
}

/// List every record of an entity
#[utoipa::path(
    get,
    path = "/api/v1/admin/{entity}",
    tag = "admin",
    params(
        ("entity" = String, Path, description = "Entity name, e.g. homes or diy-projects"),
        ("x-admin-token" = String, Header, description = "Admin token")
    ),
    responses(
        (status = 200, description = "Records as raw JSON", body = ApiResponse<Vec<serde_json::Value>>),
        (status = 401, description = "Missing or wrong admin token", body = ErrorResponse),
        (status = 404, description = "Admin disabled or unknown entity", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn list_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(entity): Path<String>,
) -> Result<Json<ApiResponse<Vec<Value>>>, HandlerError> {
    authorize(&state, &headers)?;
    let db = &state.db;

    let records = match parse_entity(&entity)? {
        AdminEntity::AppUsers => list_json::<app_user::Entity>(db).await,
        AdminEntity::Homes => list_json::<home::Entity>(db).await,
        AdminEntity::HomeUserConnections => list_json::<home_user_connection::Entity>(db).await,
        AdminEntity::Rooms => list_json::<room::Entity>(db).await,
        AdminEntity::AssetDetails => list_json::<asset_details::Entity>(db).await,
        AdminEntity::Assets => list_json::<asset::Entity>(db).await,
        AdminEntity::ConsumableDetails => list_json::<consumable_details::Entity>(db).await,
        AdminEntity::Consumables => list_json::<consumable::Entity>(db).await,
        AdminEntity::Tasks => list_json::<task::Entity>(db).await,
        AdminEntity::Logs => list_json::<log::Entity>(db).await,
        AdminEntity::DiyProjects => list_json::<diy_project::Entity>(db).await,
        AdminEntity::ProjectSteps => list_json::<project_step::Entity>(db).await,
    }
    .map_err(|e| internal_error("Admin list failed", e))?;

    let message = format!("{} {} records", records.len(), entity);
    Ok(Json(ApiResponse::ok(records, message)))
}

/// Fetch one record. Users are addressed by username; connections have no
/// single id and can only be listed.
#[utoipa::path(
    get,
    path = "/api/v1/admin/{entity}/{id}",
    tag = "admin",
    params(
        ("entity" = String, Path, description = "Entity name"),
        ("id" = String, Path, description = "Record id, or username for app-users"),
        ("x-admin-token" = String, Header, description = "Admin token")
    ),
    responses(
        (status = 200, description = "Record as raw JSON", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Missing or wrong admin token", body = ErrorResponse),
        (status = 404, description = "Admin disabled, unknown entity or record", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn get_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((entity, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Value>>, HandlerError> {
    authorize(&state, &headers)?;
    let db = &state.db;

    let record = match parse_entity(&entity)? {
        AdminEntity::AppUsers => get_json::<app_user::Entity, _>(db, id.clone()).await,
        AdminEntity::HomeUserConnections => {
            return Err(not_found("Connections can only be listed"));
        }
        AdminEntity::Homes => get_json::<home::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::Rooms => get_json::<room::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::AssetDetails => get_json::<asset_details::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::Assets => get_json::<asset::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::ConsumableDetails => {
            get_json::<consumable_details::Entity, _>(db, parse_id(&id)?).await
        }
        AdminEntity::Consumables => get_json::<consumable::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::Tasks => get_json::<task::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::Logs => get_json::<log::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::DiyProjects => get_json::<diy_project::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::ProjectSteps => get_json::<project_step::Entity, _>(db, parse_id(&id)?).await,
    }
    .map_err(|e| internal_error("Admin lookup failed", e))?
    .ok_or_else(|| not_found(format!("No {} record with id '{}'", entity, id)))?;

    Ok(Json(ApiResponse::ok(record, "Record retrieved successfully")))
}

/// Delete one record, cascading like any other delete
#[utoipa::path(
    delete,
    path = "/api/v1/admin/{entity}/{id}",
    tag = "admin",
    params(
        ("entity" = String, Path, description = "Entity name"),
        ("id" = String, Path, description = "Record id, or username for app-users"),
        ("x-admin-token" = String, Header, description = "Admin token")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "Missing or wrong admin token", body = ErrorResponse),
        (status = 404, description = "Admin disabled, unknown entity or record", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn delete_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((entity, id)): Path<(String, String)>,
) -> Result<StatusCode, HandlerError> {
    authorize(&state, &headers)?;
    let db = &state.db;

    let deleted = match parse_entity(&entity)? {
        AdminEntity::AppUsers => delete_json::<app_user::Entity, _>(db, id.clone()).await,
        AdminEntity::HomeUserConnections => {
            return Err(not_found("Connections can only be listed"));
        }
        AdminEntity::Homes => delete_json::<home::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::Rooms => delete_json::<room::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::AssetDetails => delete_json::<asset_details::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::Assets => delete_json::<asset::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::ConsumableDetails => {
            delete_json::<consumable_details::Entity, _>(db, parse_id(&id)?).await
        }
        AdminEntity::Consumables => delete_json::<consumable::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::Tasks => delete_json::<task::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::Logs => delete_json::<log::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::DiyProjects => delete_json::<diy_project::Entity, _>(db, parse_id(&id)?).await,
        AdminEntity::ProjectSteps => {
            delete_json::<project_step::Entity, _>(db, parse_id(&id)?).await
        }
    }
    .map_err(|e| internal_error("Admin delete failed", e))?;

    if deleted == 0 {
        return Err(not_found(format!("No {} record with id '{}'", entity, id)));
    }
    info!("Admin deleted {} {}", entity, id);
    Ok(StatusCode::NO_CONTENT)
}
