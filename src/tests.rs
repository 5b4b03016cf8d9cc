#[cfg(test)]
mod integration_tests {
    use crate::catalog;
    use crate::handlers::admin::ADMIN_TOKEN_HEADER;
    use crate::router::create_router;
    use crate::schemas::{ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{
        TEST_PASSWORD, bearer, init_test_tracing, register_and_login, setup_test_app_state,
        setup_test_app_with_admin, setup_test_server,
    };
    use axum::http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION};
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use common::{
        ActionResponse, ApiResponse, AssetDto, DashboardView, FlashLevel, HomesView, LoginRequest,
        ProjectDetailDto, ProjectSummaryDto, UserDto,
    };
    use model::entities::asset_details;
    use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
    use serde_json::{Value, json};

    const DASHBOARD: &str = "/api/v1/dashboard";
    const MANAGE_HOMES: &str = "/api/v1/manage-homes";

    async fn dashboard(server: &TestServer, token: &str) -> DashboardView {
        let response = server
            .get(DASHBOARD)
            .add_header(AUTHORIZATION, bearer(token))
            .await;
        response.assert_status_ok();
        let body: ApiResponse<DashboardView> = response.json();
        body.data
    }

    async fn act(server: &TestServer, token: &str, path: &str, form: Value) -> (StatusCode, ActionResponse) {
        let response = server
            .post(path)
            .add_header(AUTHORIZATION, bearer(token))
            .json(&form)
            .await;
        (response.status_code(), response.json())
    }

    async fn add_room(server: &TestServer, token: &str, name: &str) -> i32 {
        let (status, body) = act(
            server,
            token,
            DASHBOARD,
            json!({"action": "add-room", "room_name": name, "room_description": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{:?}", body.messages);

        dashboard(server, token)
            .await
            .rooms
            .into_iter()
            .find(|room| room.name == name)
            .map(|room| room.id)
            .expect("room was not listed")
    }

    /// Server whose database already holds the stored asset catalog.
    async fn inventory_server() -> (TestServer, DatabaseConnection) {
        let state = setup_test_app_state(None).await;
        catalog::load_stored_assets(&state.db).await.unwrap();
        let db = state.db.clone();
        (TestServer::new(create_router(state)).unwrap(), db)
    }

    async fn add_custom_asset(server: &TestServer, token: &str, room_id: i32, name: &str) -> AssetDto {
        let (status, body) = act(
            server,
            token,
            DASHBOARD,
            json!({
                "action": "add-custom-asset",
                "asset_name": name,
                "asset_brand": "Acme",
                "asset_model_number": "AC-1",
                "asset_category": "appliance",
                "asset_room": room_id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{:?}", body.messages);

        dashboard(server, token)
            .await
            .assets
            .into_iter()
            .find(|asset| asset.name == name)
            .expect("asset was not listed")
    }

    async fn add_asset_task(server: &TestServer, token: &str, asset_id: i32, name: &str) {
        let (status, body) = act(
            server,
            token,
            DASHBOARD,
            json!({
                "action": "add-task",
                "task_name": name,
                "task_interval": "yearly",
                "task_start_date": "2024-06-01",
                "task_asset": asset_id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{:?}", body.messages);
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = setup_test_server().await;

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "connected");
    }

    #[tokio::test]
    async fn test_health_check_reports_lost_database() {
        let state = setup_test_app_state(None).await;
        let db = state.db.clone();
        let server = TestServer::new(create_router(state)).unwrap();
        db.close().await.unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "unhealthy");
        assert_eq!(body.database, "disconnected");
    }

    #[test]
    fn test_tracing_subscriber_stays_installed() {
        init_test_tracing();
        init_test_tracing();

        assert!(tracing::enabled!(tracing::Level::ERROR));
    }

    #[tokio::test]
    async fn test_register_creates_account() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/v1/auth/register")
            .json(&json!({"username": "  alice ", "email": "alice@example.com", "password": "pw"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<UserDto> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Account created.");
        assert_eq!(body.data.username, "alice");
    }

    #[tokio::test]
    async fn test_register_rejects_short_username_and_duplicates() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/v1/auth/register")
            .json(&json!({"username": "bob", "email": "bob@example.com", "password": "pw"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "VALIDATION_ERROR");

        register_and_login(&server, "carol").await;
        let response = server
            .post("/api/v1/auth/register")
            .json(&json!({"username": "carol", "email": "other@example.com", "password": "pw"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let server = setup_test_server().await;
        register_and_login(&server, "david").await;

        let response = server
            .post("/api/v1/auth/login")
            .json(&LoginRequest {
                username: "david".to_string(),
                password: format!("{}!", TEST_PASSWORD),
            })
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "BAD_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_dashboard_requires_login() {
        let server = setup_test_server().await;

        let response = server.get(DASHBOARD).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Please log in to continue.");

        let response = server
            .get(DASHBOARD)
            .add_header(AUTHORIZATION, bearer("not-a-session"))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let server = setup_test_server().await;
        let (token, _) = register_and_login(&server, "erika").await;

        server
            .post("/api/v1/auth/logout")
            .add_header(AUTHORIZATION, bearer(&token))
            .await
            .assert_status_ok();

        server
            .get(DASHBOARD)
            .add_header(AUTHORIZATION, bearer(&token))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_new_user_lands_in_default_home() {
        let server = setup_test_server().await;
        let (token, home_id) = register_and_login(&server, "frank").await;

        let view = dashboard(&server, &token).await;

        assert_eq!(view.home.id, home_id);
        assert_eq!(view.home.name, "My Home");
        assert!(view.rooms.is_empty());
        assert_eq!(view.selected_room_id, "all");
        assert_eq!(view.interval_choices.len(), 6);
    }

    #[tokio::test]
    async fn test_task_lifecycle_through_dashboard() {
        let server = setup_test_server().await;
        let (token, _) = register_and_login(&server, "grace").await;
        let room_id = add_room(&server, &token, "Kitchen").await;

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({
                "action": "add-task",
                "task_name": "Clean filter",
                "task_interval": "monthly",
                "task_start_date": "2024-01-01",
                "task_room": room_id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Task created successfully.");
        assert_eq!(body.redirect, DASHBOARD);

        let task = dashboard(&server, &token).await.tasks.remove(0);
        assert_eq!(task.room_id, Some(room_id));
        assert_eq!(task.next_due_date, NaiveDate::from_ymd_opt(2024, 1, 31));

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({
                "action": "add-log",
                "log_task": task.id,
                "log_completion_date": "2024-02-10",
                "log_cost": "$12.50",
                "log_notes": "Rinsed and replaced",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Log recorded for task.");

        let view = dashboard(&server, &token).await;
        assert_eq!(view.logs.len(), 1);
        assert_eq!(view.tasks[0].last_completed_date, NaiveDate::from_ymd_opt(2024, 2, 10));
        assert_eq!(view.tasks[0].next_due_date, NaiveDate::from_ymd_opt(2024, 3, 11));

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({"action": "delete-task", "task_id": task.id.to_string()}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Task deleted.");

        let view = dashboard(&server, &token).await;
        assert!(view.tasks.is_empty());
        assert!(view.logs.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_action_is_rejected() {
        let server = setup_test_server().await;
        let (token, _) = register_and_login(&server, "heidi").await;

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({"action": "add-task", "task_name": "Sweep", "task_interval": "weekly"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.messages[0].level, FlashLevel::Error);
        assert_eq!(body.messages[0].text, "Task name and start date are required.");
        assert!(dashboard(&server, &token).await.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_records_of_other_homes_are_not_found() {
        let server = setup_test_server().await;
        let (owner, owner_home) = register_and_login(&server, "ivan1").await;
        let (intruder, intruder_home) = register_and_login(&server, "judy1").await;
        let room_id = add_room(&server, &owner, "Garage").await;
        let mower = add_custom_asset(&server, &owner, room_id, "Mower").await;
        add_asset_task(&server, &owner, mower.id, "Sharpen blade").await;
        let task_id = dashboard(&server, &owner).await.tasks[0].id;
        let before = dashboard(&server, &owner).await;

        let attempts = [
            (DASHBOARD, json!({"action": "delete-room", "room_id": room_id}), "Room was not found."),
            (DASHBOARD, json!({"action": "sort-room", "room_id": room_id}), "Room was not found."),
            (
                DASHBOARD,
                json!({"action": "add-log", "log_task": task_id, "log_completion_date": "2024-07-01"}),
                "Pick a valid task for the log.",
            ),
            (DASHBOARD, json!({"action": "delete-task", "task_id": task_id}), "Task was not found."),
            (DASHBOARD, json!({"action": "delete-asset", "asset_id": mower.id}), "Asset was not found."),
            (DASHBOARD, json!({"action": "sort-asset", "asset_id": mower.id}), "Asset was not found."),
            (
                DASHBOARD,
                json!({"action": "add-task", "task_name": "Borrow", "task_start_date": "2024-07-01", "task_asset": mower.id}),
                "Asset was not found.",
            ),
            (MANAGE_HOMES, json!({"action": "switch-home", "home_id": owner_home}), "Home was not found."),
            (
                MANAGE_HOMES,
                json!({"action": "update-home", "home_id": owner_home, "home_name": "Mine now"}),
                "Home was not found.",
            ),
            (MANAGE_HOMES, json!({"action": "delete-home", "home_id": owner_home}), "Home was not found."),
        ];
        for (path, form, message) in attempts {
            let (status, body) = act(&server, &intruder, path, form.clone()).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", form);
            assert!(!body.success);
            assert_eq!(body.messages[0].text, message, "{}", form);
        }

        assert_eq!(dashboard(&server, &owner).await, before);
        let intruder_view = dashboard(&server, &intruder).await;
        assert_eq!(intruder_view.home.id, intruder_home);
        assert!(intruder_view.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_sort_room_returns_filtered_view() {
        let server = setup_test_server().await;
        let (token, _) = register_and_login(&server, "kevin").await;
        let kitchen = add_room(&server, &token, "Kitchen").await;
        let garage = add_room(&server, &token, "Garage").await;

        for (name, room) in [("Wipe counters", kitchen), ("Sweep floor", garage)] {
            let (status, _) = act(
                &server,
                &token,
                DASHBOARD,
                json!({
                    "action": "add-task",
                    "task_name": name,
                    "task_interval": "weekly",
                    "task_start_date": "2024-05-01",
                    "task_room": room,
                }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({"action": "sort-room", "room_id": garage}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Showing Garage.");
        assert_eq!(body.redirect, format!("{}?room={}", DASHBOARD, garage));
        let view = body.view.expect("sorted view");
        assert_eq!(view.selected_room_id, garage.to_string());
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].name, "Sweep floor");

        let response = server
            .get(DASHBOARD)
            .add_query_param("room", kitchen)
            .add_header(AUTHORIZATION, bearer(&token))
            .await;
        let body: ApiResponse<DashboardView> = response.json();
        assert_eq!(body.data.tasks.len(), 1);
        assert_eq!(body.data.tasks[0].name, "Wipe counters");
    }

    #[tokio::test]
    async fn test_add_and_switch_homes() {
        let server = setup_test_server().await;
        let (token, first_home) = register_and_login(&server, "laura").await;

        let (status, body) = act(
            &server,
            &token,
            MANAGE_HOMES,
            json!({
                "action": "add-home",
                "home_name": "Cabin",
                "home_city": "Tahoe",
                "home_state": "ca",
                "home_zip": "96150",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Cabin was added.");
        assert_eq!(body.redirect, MANAGE_HOMES);

        let view = dashboard(&server, &token).await;
        assert_eq!(view.home.name, "Cabin");
        assert_eq!(view.home.state, "CA");

        let (status, body) = act(
            &server,
            &token,
            MANAGE_HOMES,
            json!({"action": "switch-home", "home_id": first_home}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Switched to My Home.");
        assert_eq!(dashboard(&server, &token).await.home.id, first_home);

        let response = server
            .get(MANAGE_HOMES)
            .add_header(AUTHORIZATION, bearer(&token))
            .await;
        response.assert_status_ok();
        let homes: ApiResponse<HomesView> = response.json();
        assert_eq!(homes.data.homes.len(), 2);
        assert_eq!(homes.data.current_home_id, first_home);
    }

    #[tokio::test]
    async fn test_delete_home_keeps_last_home() {
        let server = setup_test_server().await;
        let (token, first_home) = register_and_login(&server, "mallory").await;

        let (status, body) = act(
            &server,
            &token,
            MANAGE_HOMES,
            json!({"action": "delete-home", "home_id": first_home}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.messages[0].text, "You need to keep at least one home.");

        act(
            &server,
            &token,
            MANAGE_HOMES,
            json!({"action": "add-home", "home_name": "Lake House"}),
        )
        .await;
        add_room(&server, &token, "Boathouse").await;
        let lake_house = dashboard(&server, &token).await.home.id;

        let (status, body) = act(
            &server,
            &token,
            MANAGE_HOMES,
            json!({"action": "delete-home", "home_id": lake_house}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Lake House was deleted.");

        let view = dashboard(&server, &token).await;
        assert_eq!(view.home.id, first_home);
        assert!(view.rooms.is_empty());
    }

    async fn catalog_server() -> TestServer {
        let state = setup_test_app_state(None).await;
        catalog::seed_projects(&state.db).await.unwrap();
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_project_search() {
        let server = catalog_server().await;

        let response = server
            .get("/api/v1/projects/search")
            .add_query_param("search", "WOOD")
            .await;
        response.assert_status_ok();
        let body: ApiResponse<Vec<ProjectSummaryDto>> = response.json();
        let mut titles: Vec<String> = body.data.into_iter().map(|p| p.title).collect();
        titles.sort();
        assert_eq!(titles, vec!["Floating Shelves", "Wooden Coffee Table"]);
        assert_eq!(body.message, "Found 2 projects");

        let response = server.get("/api/v1/projects/search").await;
        let body: ApiResponse<Vec<ProjectSummaryDto>> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_project_detail() {
        let server = catalog_server().await;

        let response = server
            .get("/api/v1/projects/search")
            .add_query_param("search", "macrame")
            .await;
        let body: ApiResponse<Vec<ProjectSummaryDto>> = response.json();
        let id = body.data[0].id;

        let response = server.get(&format!("/api/v1/projects/{}", id)).await;
        response.assert_status_ok();
        let body: ApiResponse<ProjectDetailDto> = response.json();
        assert_eq!(body.data.summary.title, "Macrame Wall Hanging");
        assert_eq!(body.data.summary.step_count, 4);
        let numbers: Vec<i32> = body.data.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(body.data.steps[0].instruction_text, "Cut the cord");

        let response = server.get("/api/v1/projects/9999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "PROJECT_NOT_FOUND");
    }

    fn admin_header() -> HeaderName {
        HeaderName::from_static(ADMIN_TOKEN_HEADER)
    }

    #[tokio::test]
    async fn test_admin_disabled_without_token() {
        let server = setup_test_server().await;

        let response = server
            .get("/api/v1/admin/homes")
            .add_header(admin_header(), HeaderValue::from_static("anything"))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_browse_and_delete() {
        let app = setup_test_app_with_admin(Some("s3cret")).await;
        let server = TestServer::new(app).unwrap();
        let (token, _) = register_and_login(&server, "nadia").await;
        let room_id = add_room(&server, &token, "Attic").await;

        server
            .get("/api/v1/admin/rooms")
            .add_header(admin_header(), HeaderValue::from_static("wrong"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let response = server
            .get("/api/v1/admin/rooms")
            .add_header(admin_header(), HeaderValue::from_static("s3cret"))
            .await;
        response.assert_status_ok();
        let body: ApiResponse<Vec<Value>> = response.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["name"], "Attic");

        let response = server
            .get("/api/v1/admin/app-users/nadia")
            .add_header(admin_header(), HeaderValue::from_static("s3cret"))
            .await;
        response.assert_status_ok();

        server
            .delete(&format!("/api/v1/admin/rooms/{}", room_id))
            .add_header(admin_header(), HeaderValue::from_static("s3cret"))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert!(dashboard(&server, &token).await.rooms.is_empty());

        server
            .get("/api/v1/admin/widgets")
            .add_header(admin_header(), HeaderValue::from_static("s3cret"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unreadable_action_bodies_get_flash_reply() {
        let server = setup_test_server().await;
        let (token, _) = register_and_login(&server, "oscar").await;

        let bodies = [
            json!({"action": "paint-room", "room_name": "Kitchen"}),
            json!({"room_name": "Kitchen"}),
            json!({"action": "add-room", "room_name": ["Kitchen"]}),
        ];
        for path in [DASHBOARD, MANAGE_HOMES] {
            for form in &bodies {
                let (status, body) = act(&server, &token, path, form.clone()).await;

                assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", path, form);
                assert!(!body.success);
                assert_eq!(body.messages[0].level, FlashLevel::Error);
                assert_eq!(body.messages[0].text, "That form could not be read, please try again.");
                assert_eq!(body.redirect, path);
            }
        }
        assert!(dashboard(&server, &token).await.rooms.is_empty());
    }

    #[tokio::test]
    async fn test_add_asset_from_stored_catalog() {
        let (server, _) = inventory_server().await;
        let (token, _) = register_and_login(&server, "peggy").await;
        let laundry = add_room(&server, &token, "Laundry").await;

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({
                "action": "add-asset",
                "asset_name": "Smart Front Load Washer",
                "asset_brand": "LG",
                "asset_model_number": "WM4000HBA",
                "asset_category": "appliance",
                "asset_room": laundry,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Asset added to the room.");

        let view = dashboard(&server, &token).await;
        assert_eq!(view.assets.len(), 1);
        let washer = &view.assets[0];
        assert_eq!(washer.room_id, laundry);
        assert_eq!(washer.category, "appliance");
        let details = washer.details.as_ref().expect("stored details");
        assert!(details.stored);
        assert_eq!(details.brand, "LG");
        assert_eq!(view.stored_asset_details.len(), 8);

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({
                "action": "add-asset",
                "asset_name": "Toaster",
                "asset_brand": "Acme",
                "asset_model_number": "T-100",
                "asset_room": laundry,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.messages[0].text, "That asset is not in the stored catalog.");
        assert_eq!(dashboard(&server, &token).await.assets.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_asset_details_belong_to_user() {
        let (server, db) = inventory_server().await;
        let (token, _) = register_and_login(&server, "quentin").await;
        let garage = add_room(&server, &token, "Garage").await;

        let asset = add_custom_asset(&server, &token, garage, "Shop Vac").await;

        assert_eq!(asset.room_id, garage);
        let details = asset.details.expect("custom details");
        assert!(!details.stored);
        assert_eq!(details.brand, "Acme");
        assert_eq!(details.model_number, "AC-1");

        let owned = asset_details::Entity::find()
            .filter(asset_details::Column::Owner.eq("quentin"))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, details.id);

        let view = dashboard(&server, &token).await;
        assert_eq!(view.stored_asset_details.len(), 8);
        assert!(view.stored_asset_details.iter().all(|d| d.id != details.id));
    }

    #[tokio::test]
    async fn test_add_consumable_schedules_replacement() {
        let server = setup_test_server().await;
        let (token, _) = register_and_login(&server, "rupert").await;
        let kitchen = add_room(&server, &token, "Kitchen").await;
        let fridge = add_custom_asset(&server, &token, kitchen, "Fridge").await;

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({
                "action": "add-consumable",
                "consumable_name": "Water filter",
                "consumable_brand": "Acme",
                "consumable_part_number": "WF-2",
                "consumable_asset": fridge.id,
                "consumable_interval": "quarterly",
                "consumable_start_date": "2024-01-01",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Consumable added to the asset.");

        let view = dashboard(&server, &token).await;
        assert_eq!(view.consumables.len(), 1);
        let filter = &view.consumables[0];
        assert_eq!(filter.asset_id, fridge.id);
        assert!(filter.details_id.is_some());

        assert_eq!(view.tasks.len(), 1);
        let task = &view.tasks[0];
        assert_eq!(task.name, "Replace Water filter");
        assert_eq!(task.interval, "quarterly");
        assert_eq!(task.consumable_id, Some(filter.id));
        assert_eq!(task.asset_id, Some(fridge.id));
        assert_eq!(task.room_id, Some(kitchen));
        assert_eq!(task.last_completed_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(task.next_due_date, NaiveDate::from_ymd_opt(2024, 4, 1));

        // Without a start date there is nothing to schedule.
        let (status, _) = act(
            &server,
            &token,
            DASHBOARD,
            json!({
                "action": "add-consumable",
                "consumable_name": "Ice maker line",
                "consumable_asset": fridge.id,
                "consumable_interval": "yearly",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let view = dashboard(&server, &token).await;
        assert_eq!(view.consumables.len(), 2);
        assert_eq!(view.tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_asset_removes_its_tasks() {
        let server = setup_test_server().await;
        let (token, _) = register_and_login(&server, "sybil").await;
        let basement = add_room(&server, &token, "Basement").await;
        let furnace = add_custom_asset(&server, &token, basement, "Furnace").await;
        let heater = add_custom_asset(&server, &token, basement, "Water Heater").await;
        add_asset_task(&server, &token, furnace.id, "Service furnace").await;
        add_asset_task(&server, &token, heater.id, "Flush tank").await;

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({"action": "delete-asset", "asset_id": furnace.id}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Asset was deleted.");

        let view = dashboard(&server, &token).await;
        assert_eq!(view.assets.len(), 1);
        assert_eq!(view.assets[0].id, heater.id);
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].name, "Flush tank");
        assert_eq!(view.rooms.len(), 1);
    }

    #[tokio::test]
    async fn test_update_home_validates_location() {
        let server = setup_test_server().await;
        let (token, home_id) = register_and_login(&server, "trent").await;

        let (status, body) = act(
            &server,
            &token,
            MANAGE_HOMES,
            json!({"action": "update-home", "home_id": home_id, "home_name": "Home", "home_zip": "1234"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.messages[0].text, "ZIP code must look like 12345 or 12345-6789.");

        let (status, body) = act(
            &server,
            &token,
            MANAGE_HOMES,
            json!({"action": "update-home", "home_id": home_id, "home_name": "Home", "home_state": "Ore"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.messages[0].text, "State must be a two-letter code.");
        assert_eq!(dashboard(&server, &token).await.home.name, "My Home");

        let (status, body) = act(
            &server,
            &token,
            MANAGE_HOMES,
            json!({
                "action": "update-home",
                "home_id": home_id,
                "home_name": " Townhouse ",
                "home_address": "12 Elm St",
                "home_city": "Portland",
                "home_state": "or",
                "home_zip": "97201-1234",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Home details updated.");

        let home = dashboard(&server, &token).await.home;
        assert_eq!(home.name, "Townhouse");
        assert_eq!(home.address, "12 Elm St");
        assert_eq!(home.city, "Portland");
        assert_eq!(home.state, "OR");
        assert_eq!(home.zip_code, "97201-1234");
    }

    #[tokio::test]
    async fn test_sort_asset_filters_tasks() {
        let server = setup_test_server().await;
        let (token, _) = register_and_login(&server, "ursula").await;
        let kitchen = add_room(&server, &token, "Kitchen").await;
        let oven = add_custom_asset(&server, &token, kitchen, "Oven").await;
        let sink = add_custom_asset(&server, &token, kitchen, "Sink").await;
        add_asset_task(&server, &token, oven.id, "Clean oven").await;
        add_asset_task(&server, &token, sink.id, "Descale tap").await;

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({"action": "sort-asset", "asset_id": sink.id}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.messages[0].text, "Showing Sink.");
        assert_eq!(body.redirect, format!("{}?asset={}", DASHBOARD, sink.id));
        let view = body.view.expect("sorted view");
        assert_eq!(view.selected_asset_id, Some(sink.id));
        assert_eq!(view.assets.len(), 2);
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].name, "Descale tap");
    }

    #[tokio::test]
    async fn test_task_follows_its_asset_and_consumable() {
        let server = setup_test_server().await;
        let (token, _) = register_and_login(&server, "victor").await;
        let kitchen = add_room(&server, &token, "Kitchen").await;
        let garage = add_room(&server, &token, "Garage").await;
        let fridge = add_custom_asset(&server, &token, kitchen, "Fridge").await;
        let freezer = add_custom_asset(&server, &token, garage, "Chest Freezer").await;

        // The dashboard is showing the garage, the fridge still stays in the kitchen.
        let response = server
            .post(DASHBOARD)
            .add_query_param("room", garage)
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({
                "action": "add-task",
                "task_name": "Vacuum coils",
                "task_start_date": "2024-02-01",
                "task_asset": fridge.id,
            }))
            .await;
        response.assert_status_ok();
        let task = dashboard(&server, &token).await.tasks.remove(0);
        assert_eq!(task.asset_id, Some(fridge.id));
        assert_eq!(task.room_id, Some(kitchen));

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({
                "action": "add-task",
                "task_name": "Defrost",
                "task_start_date": "2024-02-01",
                "task_asset": fridge.id,
                "task_room": garage,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.messages[0].text, "That asset is in a different room.");

        act(
            &server,
            &token,
            DASHBOARD,
            json!({"action": "add-consumable", "consumable_name": "Gasket", "consumable_asset": fridge.id}),
        )
        .await;
        let gasket = dashboard(&server, &token).await.consumables.remove(0);

        let (status, body) = act(
            &server,
            &token,
            DASHBOARD,
            json!({
                "action": "add-task",
                "task_name": "Replace gasket",
                "task_start_date": "2024-02-01",
                "task_asset": freezer.id,
                "task_consumable": gasket.id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.messages[0].text, "That consumable belongs to a different asset.");

        let (status, _) = act(
            &server,
            &token,
            DASHBOARD,
            json!({
                "action": "add-task",
                "task_name": "Replace gasket",
                "task_start_date": "2024-02-01",
                "task_consumable": gasket.id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let view = dashboard(&server, &token).await;
        assert_eq!(view.tasks.len(), 2);
        let gasket_task = view
            .tasks
            .iter()
            .find(|t| t.name == "Replace gasket")
            .expect("gasket task");
        assert_eq!(gasket_task.consumable_id, Some(gasket.id));
        assert_eq!(gasket_task.asset_id, Some(fridge.id));
        assert_eq!(gasket_task.room_id, Some(kitchen));
    }
}
