//! Root of all SeaORM entity modules.
//! Household side: users, homes, rooms, assets, consumables, tasks and logs.
//! Catalog side: DIY projects and their steps, unrelated to the household
//! tables except for sharing the database.

pub mod app_user;
pub mod asset;
pub mod asset_details;
pub mod consumable;
pub mod consumable_details;
pub mod diy_project;
pub mod home;
pub mod home_user_connection;
pub mod log;
pub mod project_step;
pub mod room;
pub mod task;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::app_user::Entity as AppUser;
    pub use super::asset::Entity as Asset;
    pub use super::asset_details::Entity as AssetDetails;
    pub use super::consumable::Entity as Consumable;
    pub use super::consumable_details::Entity as ConsumableDetails;
    pub use super::diy_project::Entity as DiyProject;
    pub use super::home::Entity as Home;
    pub use super::home_user_connection::Entity as HomeUserConnection;
    pub use super::log::Entity as Log;
    pub use super::project_step::Entity as ProjectStep;
    pub use super::room::Entity as Room;
    pub use super::task::Entity as Task;
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        // Cascades below depend on this
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    /// Builds one user with one home holding a room, an asset, a consumable,
    /// a task and a log. Returns the home.
    async fn seed_household(db: &DatabaseConnection, username: &str) -> Result<home::Model, DbErr> {
        app_user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{}@example.com", username)),
            password_hash: Set("not-a-real-hash".to_string()),
        }
        .insert(db)
        .await?;

        let home = home::ActiveModel {
            name: Set("Cottage".to_string()),
            address: Set("1 Lane".to_string()),
            city: Set("Springfield".to_string()),
            state: Set("IL".to_string()),
            zip_code: Set("62701".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        home_user_connection::ActiveModel {
            username: Set(username.to_string()),
            home_id: Set(home.id),
        }
        .insert(db)
        .await?;

        let room = room::ActiveModel {
            home_id: Set(home.id),
            name: Set("Kitchen".to_string()),
            description: Set(String::new()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let details = asset_details::ActiveModel {
            name: Set("Under Sink Water Filter".to_string()),
            brand: Set("GE".to_string()),
            model_number: Set("GXK140TNN".to_string()),
            owner: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let asset = asset::ActiveModel {
            room_id: Set(room.id),
            details_id: Set(Some(details.id)),
            name: Set("Sink filter".to_string()),
            category: Set(asset::AssetCategory::Appliance),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let consumable = consumable::ActiveModel {
            asset_id: Set(asset.id),
            details_id: Set(None),
            name: Set("Cartridge".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let task = task::ActiveModel {
            home_id: Set(home.id),
            room_id: Set(Some(room.id)),
            asset_id: Set(Some(asset.id)),
            consumable_id: Set(Some(consumable.id)),
            name: Set("Replace cartridge".to_string()),
            interval: Set(task::TaskInterval::Quarterly),
            next_due_date: Set(NaiveDate::from_ymd_opt(2024, 4, 1)),
            last_completed_date: Set(NaiveDate::from_ymd_opt(2024, 1, 1)),
            ..Default::default()
        }
        .insert(db)
        .await?;

        log::ActiveModel {
            task_id: Set(task.id),
            completion_date: Set(NaiveDate::from_ymd_opt(2024, 1, 1)),
            cost: Set(Some(Decimal::new(2499, 2))),
            notes: Set("Bought two".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(home)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let home = seed_household(&db, "alice").await?;

        // Home -> users through the join table
        let users = home.find_related(AppUser).all(&db).await?;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");

        // Task -> logs
        let task = Task::find()
            .filter(task::Column::HomeId.eq(home.id))
            .one(&db)
            .await?
            .expect("task");
        assert_eq!(task.interval, task::TaskInterval::Quarterly);
        let logs = task.find_related(Log).all(&db).await?;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].cost, Some(Decimal::new(2499, 2)));

        // Stored details are shared
        let details = AssetDetails::find().all(&db).await?;
        assert!(details.iter().all(|d| d.is_stored()));

        Ok(())
    }

    #[tokio::test]
    async fn test_home_delete_cascades() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let home = seed_household(&db, "alice").await?;
        let other = seed_household(&db, "bobby").await?;

        Home::delete_by_id(home.id).exec(&db).await?;

        // Only the second household survives
        assert_eq!(Room::find().count(&db).await?, 1);
        assert_eq!(Asset::find().count(&db).await?, 1);
        assert_eq!(Consumable::find().count(&db).await?, 1);
        assert_eq!(Task::find().count(&db).await?, 1);
        assert_eq!(Log::find().count(&db).await?, 1);
        assert_eq!(HomeUserConnection::find().count(&db).await?, 1);

        let remaining = Task::find().one(&db).await?.expect("task");
        assert_eq!(remaining.home_id, other.id);

        // Users and the shared catalog are untouched
        assert_eq!(AppUser::find().count(&db).await?, 2);
        assert_eq!(AssetDetails::find().count(&db).await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_asset_details_delete_keeps_asset() -> Result<(), DbErr> {
        let db = setup_db().await?;
        seed_household(&db, "alice").await?;

        AssetDetails::delete_many().exec(&db).await?;

        let asset = Asset::find().one(&db).await?.expect("asset");
        assert_eq!(asset.details_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_project_steps_ordered_by_number() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let project = diy_project::ActiveModel {
            title: Set("Floating Shelves".to_string()),
            description: Set("Shelves".to_string()),
            avg_price: Set(Some(Decimal::new(6900, 2))),
            step_count: Set(3),
            estimated_time_minutes: Set(Some(180)),
            is_rental_safe: Set(false),
            requires_drilling: Set(true),
            materials_json: Set(diy_project::encode_list(&[
                "wood".to_string(),
                "brackets".to_string(),
            ])),
            tools_json: Set(diy_project::encode_list(&["drill".to_string()])),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        for (number, text) in [(3, "Secure"), (1, "Measure"), (2, "Drill")] {
            project_step::ActiveModel {
                project_id: Set(project.id),
                step_number: Set(number),
                instruction_text: Set(text.to_string()),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        let steps = project
            .find_related(ProjectStep)
            .order_by_asc(project_step::Column::StepNumber)
            .all(&db)
            .await?;
        let texts: Vec<_> = steps.iter().map(|s| s.instruction_text.as_str()).collect();
        assert_eq!(texts, vec!["Measure", "Drill", "Secure"]);
        assert_eq!(project.materials(), vec!["wood", "brackets"]);
        assert_eq!(project.tools(), vec!["drill"]);

        DiyProject::delete_by_id(project.id).exec(&db).await?;
        assert_eq!(ProjectStep::find().count(&db).await?, 0);

        Ok(())
    }

    #[test]
    fn test_interval_tags() {
        assert_eq!(task::TaskInterval::from_tag(" Weekly "), task::TaskInterval::Weekly);
        assert_eq!(task::TaskInterval::from_tag(""), task::TaskInterval::OneTime);
        assert_eq!(task::TaskInterval::from_tag("fortnightly"), task::TaskInterval::OneTime);
        assert_eq!(task::TaskInterval::Quarterly.as_tag(), "quarterly");
        assert_eq!(asset::AssetCategory::from_tag("FURNITURE"), asset::AssetCategory::Furniture);
        assert_eq!(asset::AssetCategory::from_tag("boat"), asset::AssetCategory::General);
    }
}
