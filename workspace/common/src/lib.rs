//! Common transport-layer types shared between the HTTP handlers, their tests
//! and any client. Request bodies keep raw form semantics (strings that still
//! need validation); response bodies are flat view models.

mod actions;
mod auth;
mod dashboard;
mod projects;

pub use actions::{ActionRequest, ActionResponse, FlashLevel, FlashMessage};
pub use auth::{LoginRequest, LoginResponse, RegisterRequest, UserDto};
pub use dashboard::{
    AssetDetailsDto, AssetDto, ChoiceDto, ConsumableDto, DashboardView, HomeDto, HomesView,
    LogDto, RoomDto, TaskDto,
};
pub use projects::{ProjectDetailDto, ProjectStepDto, ProjectSummaryDto};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
