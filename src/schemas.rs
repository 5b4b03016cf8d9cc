use common::{
    ActionRequest, ActionResponse, ApiResponse, AssetDetailsDto, AssetDto, ChoiceDto,
    ConsumableDto, DashboardView, FlashLevel, FlashMessage, HomeDto, HomesView, LogDto,
    LoginRequest, LoginResponse, ProjectDetailDto, ProjectStepDto, ProjectSummaryDto,
    RegisterRequest, RoomDto, TaskDto, UserDto,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{
    Modify, OpenApi, ToSchema,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::session::SessionStore;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Logged-in sessions keyed by bearer token
    pub sessions: SessionStore,
    /// Shared secret for the admin browser. Admin routes are hidden when unset.
    pub admin_token: Option<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

struct SessionAuth;

impl Modify for SessionAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::dashboard::post_dashboard,
        crate::handlers::homes::get_homes,
        crate::handlers::homes::post_homes,
        crate::handlers::projects::search_projects,
        crate::handlers::projects::get_project,
        crate::handlers::admin::list_records,
        crate::handlers::admin::get_record,
        crate::handlers::admin::delete_record,
    ),
    components(
        schemas(
            ApiResponse<UserDto>,
            ApiResponse<LoginResponse>,
            ApiResponse<DashboardView>,
            ApiResponse<HomesView>,
            ApiResponse<Vec<ProjectSummaryDto>>,
            ApiResponse<ProjectDetailDto>,
            ErrorResponse,
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UserDto,
            ActionRequest,
            ActionResponse,
            FlashLevel,
            FlashMessage,
            DashboardView,
            HomesView,
            HomeDto,
            RoomDto,
            AssetDto,
            AssetDetailsDto,
            ConsumableDto,
            TaskDto,
            LogDto,
            ChoiceDto,
            ProjectSummaryDto,
            ProjectDetailDto,
            ProjectStepDto,
        )
    ),
    modifiers(&SessionAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and sessions"),
        (name = "dashboard", description = "Rooms, assets, tasks and logs of the current home"),
        (name = "homes", description = "Managing the homes of a user"),
        (name = "projects", description = "DIY project catalog"),
        (name = "admin", description = "Raw record browser"),
    ),
    info(
        title = "HomeKeep API",
        description = "Household asset and maintenance tracker with a DIY project catalog",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
