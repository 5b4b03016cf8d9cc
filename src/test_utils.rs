#[cfg(test)]
pub mod test_utils {
    use std::time::Duration;

    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::session::SessionStore;
    use axum::Router;
    use axum::http::{HeaderValue, StatusCode};
    use axum_test::TestServer;
    use common::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const TEST_PASSWORD: &str = "correct horse";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        db.execute_unprepared("PRAGMA foreign_keys = ON;")
            .await
            .expect("Failed to enable foreign keys");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state(admin_token: Option<&str>) -> AppState {
        let db = setup_test_db().await;

        AppState {
            db,
            sessions: SessionStore::new(Duration::from_secs(600)),
            admin_token: admin_token.map(str::to_string),
        }
    }

    /// Installs a global stderr subscriber for tests, once per test binary.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    pub fn init_test_tracing() {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        // A subscriber installed by an earlier test keeps serving.
        let _ = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        setup_test_app_with_admin(None).await
    }

    pub async fn setup_test_app_with_admin(admin_token: Option<&str>) -> Router {
        init_test_tracing();

        let state = setup_test_app_state(admin_token).await;
        create_router(state)
    }

    pub async fn setup_test_server() -> TestServer {
        TestServer::new(setup_test_app().await).expect("Failed to start test server")
    }

    /// Registers `username` and logs in, returning the session token and the
    /// id of the home created at registration.
    pub async fn register_and_login(server: &TestServer, username: &str) -> (String, i32) {
        let register = RegisterRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: TEST_PASSWORD.to_string(),
        };
        server
            .post("/api/v1/auth/register")
            .json(&register)
            .await
            .assert_status(StatusCode::CREATED);

        let login = LoginRequest {
            username: username.to_string(),
            password: TEST_PASSWORD.to_string(),
        };
        let response = server.post("/api/v1/auth/login").json(&login).await;
        response.assert_status_ok();
        let body: ApiResponse<LoginResponse> = response.json();
        (body.data.token, body.data.home_id)
    }

    /// `Authorization` header value for a session token.
    pub fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("Invalid token header")
    }
}
