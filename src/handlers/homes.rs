use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use common::{ActionRequest, ActionResponse, ApiResponse, HomesView};
use tracing::instrument;

use super::dashboard::run_action;
use super::{HandlerError, internal_error, resolve_home};
use crate::listing::{self, DashboardQuery};
use crate::schemas::{AppState, ErrorResponse};
use crate::session::RequestContext;

pub const MANAGE_HOMES_PATH: &str = "/api/v1/manage-homes";

/// Homes of the caller
#[utoipa::path(
    get,
    path = "/api/v1/manage-homes",
    tag = "homes",
    security(("session_token" = [])),
    responses(
        (status = 200, description = "Homes of the user", body = ApiResponse<HomesView>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, ctx), fields(username = %ctx.username))]
pub async fn get_homes(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<ApiResponse<HomesView>>, HandlerError> {
    let home = resolve_home(&state, &ctx).await?;
    let view = listing::homes_view(&state.db, &ctx.username, home.id)
        .await
        .map_err(|e| internal_error("Failed to list homes", e))?;
    Ok(Json(ApiResponse::ok(view, "Homes retrieved successfully")))
}

/// Submit a manage-homes form action
#[utoipa::path(
    post,
    path = "/api/v1/manage-homes",
    tag = "homes",
    request_body = ActionRequest,
    security(("session_token" = [])),
    responses(
        (status = 200, description = "Action applied", body = ActionResponse),
        (status = 400, description = "Invalid input", body = ActionResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Home not found among the user's homes", body = ActionResponse),
        (status = 500, description = "Internal server error", body = ActionResponse)
    )
)]
#[instrument(skip(state, ctx, payload), fields(username = %ctx.username))]
pub async fn post_homes(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ActionResponse>), HandlerError> {
    run_action(&state, &ctx, &DashboardQuery::default(), payload, MANAGE_HOMES_PATH).await
}
