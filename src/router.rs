use crate::handlers::{
    admin::{delete_record, get_record, list_records},
    auth::{login, logout, register},
    dashboard::{get_dashboard, post_dashboard},
    health::health_check,
    homes::{get_homes, post_homes},
    projects::{get_project, search_projects},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Accounts and sessions
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        // Household pages
        .route("/api/v1/dashboard", get(get_dashboard).post(post_dashboard))
        .route("/api/v1/manage-homes", get(get_homes).post(post_homes))
        // DIY catalog
        .route("/api/v1/projects/search", get(search_projects))
        .route("/api/v1/projects/:project_id", get(get_project))
        // Admin browser
        .route("/api/v1/admin/:entity", get(list_records))
        .route("/api/v1/admin/:entity/:id", get(get_record).delete(delete_record))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
