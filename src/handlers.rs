pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod homes;
pub mod projects;

use axum::{http::StatusCode, response::Json};
use model::entities::home;
use tracing::error;

use crate::listing;
use crate::schemas::{AppState, ErrorResponse};
use crate::session::RequestContext;

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn internal_error(context: &str, e: impl std::fmt::Display) -> HandlerError {
    error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(
            "DATABASE_ERROR",
            "Something went wrong, please try again.",
        )),
    )
}

/// Current home of the caller, keeping the session in sync when it had to
/// fall back to another home.
pub(crate) async fn resolve_home(
    state: &AppState,
    ctx: &RequestContext,
) -> Result<home::Model, HandlerError> {
    let home = listing::current_home(&state.db, &ctx.username, ctx.home_id)
        .await
        .map_err(|e| internal_error("Failed to resolve current home", e))?;

    if ctx.home_id != Some(home.id) {
        state.sessions.set_home(&ctx.token, home.id).await;
    }
    Ok(home)
}
