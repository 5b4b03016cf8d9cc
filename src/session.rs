//! Logged-in sessions and the per-request user context.
//!
//! A session is an opaque bearer token mapped to the username and the home the
//! user is currently looking at. Sessions live in memory and expire after a
//! configurable idle period.

use std::time::Duration;

use axum::{
    Json, async_trait,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use moka::future::Cache;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::schemas::{AppState, ErrorResponse};

pub const LOGIN_REQUIRED: &str = "Please log in to continue.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionData {
    pub username: String,
    pub home_id: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    cache: Cache<String, SessionData>,
}

impl SessionStore {
    pub fn new(idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_idle(idle)
            .build();
        Self { cache }
    }

    /// Starts a session and returns its token.
    pub async fn open(&self, username: &str, home_id: Option<i32>) -> String {
        let token = Uuid::new_v4().to_string();
        self.cache
            .insert(
                token.clone(),
                SessionData {
                    username: username.to_string(),
                    home_id,
                },
            )
            .await;
        debug!("Opened session for user {}", username);
        token
    }

    pub async fn get(&self, token: &str) -> Option<SessionData> {
        self.cache.get(token).await
    }

    /// Points the session at another home. Unknown tokens are ignored.
    pub async fn set_home(&self, token: &str, home_id: i32) {
        if let Some(mut data) = self.cache.get(token).await {
            trace!("Session of {} now on home {}", data.username, home_id);
            data.home_id = Some(home_id);
            self.cache.insert(token.to_string(), data).await;
        }
    }

    pub async fn close(&self, token: &str) {
        self.cache.invalidate(token).await;
    }
}

/// The authenticated caller, extracted from the `Authorization: Bearer` header.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub token: String,
    pub username: String,
    pub home_id: Option<i32>,
}

pub struct LoginRequired;

impl IntoResponse for LoginRequired {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("LOGIN_REQUIRED", LOGIN_REQUIRED)),
        )
            .into_response()
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = LoginRequired;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(LoginRequired)?;
        let session = state.sessions.get(token).await.ok_or_else(|| {
            debug!("Rejected unknown or expired session token");
            LoginRequired
        })?;

        Ok(RequestContext {
            token: token.to_string(),
            username: session.username,
            home_id: session.home_id,
        })
    }
}
