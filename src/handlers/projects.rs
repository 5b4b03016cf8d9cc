use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common::{ApiResponse, ProjectDetailDto, ProjectStepDto, ProjectSummaryDto};
use model::entities::diy_project;
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::IntoParams;

use super::{HandlerError, internal_error};
use crate::catalog;
use crate::schemas::{AppState, ErrorResponse};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Text to look for in titles, descriptions and materials
    #[serde(default)]
    pub search: String,
}

fn summary(project: &diy_project::Model) -> ProjectSummaryDto {
    ProjectSummaryDto {
        id: project.id,
        title: project.title.clone(),
        description: project.description.clone(),
        avg_price: project.avg_price,
        step_count: project.step_count,
        estimated_time_minutes: project.estimated_time_minutes,
        is_rental_safe: project.is_rental_safe,
        requires_drilling: project.requires_drilling,
    }
}

/// Search the DIY project catalog
#[utoipa::path(
    get,
    path = "/api/v1/projects/search",
    tag = "projects",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching projects", body = ApiResponse<Vec<ProjectSummaryDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search_projects(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<ProjectSummaryDto>>>, HandlerError> {
    let projects = catalog::search_projects(&state.db, &query.search)
        .await
        .map_err(|e| internal_error("Project search failed", e))?;
    debug!("Search {:?} matched {} projects", query.search, projects.len());

    let data: Vec<ProjectSummaryDto> = projects.iter().map(summary).collect();
    let message = format!("Found {} projects", data.len());
    Ok(Json(ApiResponse::ok(data, message)))
}

/// A DIY project with its steps
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(
        ("project_id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project with ordered steps", body = ApiResponse<ProjectDetailDto>),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<ApiResponse<ProjectDetailDto>>, HandlerError> {
    let (project, steps) = catalog::project_with_steps(&state.db, project_id)
        .await
        .map_err(|e| internal_error("Project lookup failed", e))?
        .ok_or_else(|| {
            debug!("Project {} not found", project_id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "PROJECT_NOT_FOUND",
                    format!("Project with ID {} not found", project_id),
                )),
            )
        })?;

    let data = ProjectDetailDto {
        summary: summary(&project),
        materials: project.materials(),
        tools: project.tools(),
        steps: steps
            .into_iter()
            .map(|step| ProjectStepDto {
                step_number: step.step_number,
                instruction_text: step.instruction_text,
            })
            .collect(),
    };
    Ok(Json(ApiResponse::ok(data, "Project retrieved successfully")))
}
