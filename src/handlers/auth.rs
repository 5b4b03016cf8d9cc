use axum::{extract::State, http::StatusCode, response::Json};
use common::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest, UserDto};
use tracing::{debug, info, instrument, warn};

use super::{HandlerError, internal_error};
use crate::auth::{AuthError, authenticate, register_user};
use crate::listing;
use crate::schemas::{AppState, ErrorResponse};
use crate::session::RequestContext;

fn auth_error(e: AuthError) -> HandlerError {
    match e {
        AuthError::Invalid(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", message)),
        ),
        AuthError::UsernameTaken => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("USERNAME_TAKEN", e.to_string())),
        ),
        AuthError::BadCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("BAD_CREDENTIALS", e.to_string())),
        ),
        AuthError::Hashing(_) | AuthError::Database(_) => internal_error("Auth failure", e),
    }
}

/// Create an account with its first home
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), HandlerError> {
    let (user, home) = register_user(&state.db, &request).await.map_err(|e| {
        warn!("Registration failed: {}", e);
        auth_error(e)
    })?;
    debug!("User {} starts in home {}", user.username, home.id);

    let data = UserDto {
        username: user.username,
        email: user.email,
    };
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(data, "Account created."))))
}

/// Log in and receive a session token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, HandlerError> {
    let user = authenticate(&state.db, &request.username, &request.password)
        .await
        .map_err(auth_error)?;

    let home = listing::current_home(&state.db, &user.username, None)
        .await
        .map_err(|e| internal_error("Failed to resolve home at login", e))?;
    let token = state.sessions.open(&user.username, Some(home.id)).await;
    info!("User {} logged in", user.username);

    let data = LoginResponse {
        token,
        username: user.username,
        home_id: home.id,
    };
    Ok(Json(ApiResponse::ok(data, "You are now logged in.")))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    security(("session_token" = [])),
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<String>),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state, ctx), fields(username = %ctx.username))]
pub async fn logout(State(state): State<AppState>, ctx: RequestContext) -> Json<ApiResponse<String>> {
    state.sessions.close(&ctx.token).await;
    info!("User {} logged out", ctx.username);
    Json(ApiResponse::ok(ctx.username, "You are now logged out."))
}
