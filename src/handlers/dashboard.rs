use axum::{
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use chrono::Local;
use common::{ActionRequest, ActionResponse, ApiResponse, DashboardView, FlashMessage};
use tracing::{debug, error, instrument, warn};

use super::{HandlerError, internal_error, resolve_home};
use crate::actions::{self, ActionContext, ActionError, Command};
use crate::listing::{self, DashboardQuery, ListingFilter};
use crate::schemas::{AppState, ErrorResponse};
use crate::session::RequestContext;

pub const DASHBOARD_PATH: &str = "/api/v1/dashboard";

const UNREADABLE_FORM: &str = "That form could not be read, please try again.";

/// Dashboard of the current home
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(DashboardQuery),
    security(("session_token" = [])),
    responses(
        (status = 200, description = "Dashboard of the current home", body = ApiResponse<DashboardView>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, ctx), fields(username = %ctx.username))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardView>>, HandlerError> {
    let filter = ListingFilter::try_from(&query).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", e.message)),
        )
    })?;

    let home = resolve_home(&state, &ctx).await?;
    let view = listing::dashboard_view(&state.db, &home, filter, Local::now().date_naive())
        .await
        .map_err(|e| internal_error("Failed to build dashboard", e))?;

    debug!("Dashboard of home {} with {} tasks", home.id, view.tasks.len());
    Ok(Json(ApiResponse::ok(view, "Dashboard retrieved successfully")))
}

/// Submit a dashboard form action
#[utoipa::path(
    post,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(DashboardQuery),
    request_body = ActionRequest,
    security(("session_token" = [])),
    responses(
        (status = 200, description = "Action applied", body = ActionResponse),
        (status = 400, description = "Invalid input", body = ActionResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Referenced record not found in the current home", body = ActionResponse),
        (status = 500, description = "Internal server error", body = ActionResponse)
    )
)]
#[instrument(skip(state, ctx, payload), fields(username = %ctx.username))]
pub async fn post_dashboard(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<DashboardQuery>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ActionResponse>), HandlerError> {
    run_action(&state, &ctx, &query, payload, DASHBOARD_PATH).await
}

fn failure(status: StatusCode, message: String, redirect: String) -> (StatusCode, Json<ActionResponse>) {
    (
        status,
        Json(ActionResponse {
            success: false,
            messages: vec![FlashMessage::error(message)],
            redirect,
            view: None,
        }),
    )
}

/// Validates and executes an action for the caller's current home.
///
/// Shared by the dashboard and manage-homes endpoints; `origin` is the
/// listing the client is sent back to. A body that is not a known action
/// gets the same flash reply as a form that fails validation.
pub(crate) async fn run_action(
    state: &AppState,
    ctx: &RequestContext,
    query: &DashboardQuery,
    payload: Result<Json<ActionRequest>, JsonRejection>,
    origin: &str,
) -> Result<(StatusCode, Json<ActionResponse>), HandlerError> {
    let return_filter = ListingFilter::try_from(query).unwrap_or_default();
    let back = format!("{}{}", origin, return_filter.query_string());

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unreadable action body: {}", rejection.body_text());
            return Ok(failure(StatusCode::BAD_REQUEST, UNREADABLE_FORM.to_string(), back));
        }
    };
    debug!("Running {} for {}", request.tag(), ctx.username);

    let command = match Command::try_from(request) {
        Ok(command) => command,
        Err(e) => {
            debug!("Rejected action: {}", e);
            return Ok(failure(StatusCode::BAD_REQUEST, e.message, back));
        }
    };

    let home = resolve_home(state, ctx).await?;
    let action_ctx = ActionContext {
        username: &ctx.username,
        home: &home,
        selected_room: return_filter.room,
    };

    let outcome = match actions::execute(&state.db, &action_ctx, command).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let status = match &e {
                ActionError::Validation(_) => StatusCode::BAD_REQUEST,
                ActionError::NotFound(_) => StatusCode::NOT_FOUND,
                ActionError::Database(db_error) => {
                    error!("Action failed on home {}: {}", home.id, db_error);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            warn!("Action not applied: {}", e);
            return Ok(failure(status, e.user_message(), back));
        }
    };

    if let Some(home_id) = outcome.current_home {
        state.sessions.set_home(&ctx.token, home_id).await;
    }

    let (redirect, view) = match outcome.filter {
        Some(filter) => {
            let view = listing::dashboard_view(&state.db, &home, filter, Local::now().date_naive())
                .await
                .map_err(|e| internal_error("Failed to build filtered dashboard", e))?;
            (format!("{}{}", DASHBOARD_PATH, filter.query_string()), Some(view))
        }
        None => (back, None),
    };

    Ok((
        StatusCode::OK,
        Json(ActionResponse {
            success: true,
            messages: vec![outcome.message],
            redirect,
            view,
        }),
    ))
}
