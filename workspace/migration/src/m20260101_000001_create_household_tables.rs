use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create app_users table
        manager
            .create_table(
                Table::create()
                    .table(AppUsers::Table)
                    .if_not_exists()
                    .col(string_len(AppUsers::Username, 20).primary_key())
                    .col(string_len(AppUsers::Email, 254))
                    .col(string(AppUsers::PasswordHash))
                    .to_owned(),
            )
            .await?;

        // Create homes table
        manager
            .create_table(
                Table::create()
                    .table(Homes::Table)
                    .if_not_exists()
                    .col(pk_auto(Homes::Id))
                    .col(string(Homes::Name))
                    .col(string(Homes::Address).default(""))
                    .col(string(Homes::City).default(""))
                    .col(string_len(Homes::State, 2).default(""))
                    .col(string_len(Homes::ZipCode, 10).default(""))
                    .to_owned(),
            )
            .await?;

        // Create home_user_connections table (join table)
        manager
            .create_table(
                Table::create()
                    .table(HomeUserConnections::Table)
                    .if_not_exists()
                    .col(string_len(HomeUserConnections::Username, 20))
                    .col(integer(HomeUserConnections::HomeId))
                    .primary_key(
                        Index::create()
                            .name("pk_home_user_connections")
                            .col(HomeUserConnections::Username)
                            .col(HomeUserConnections::HomeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_home_user_connections_user")
                            .from(HomeUserConnections::Table, HomeUserConnections::Username)
                            .to(AppUsers::Table, AppUsers::Username)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_home_user_connections_home")
                            .from(HomeUserConnections::Table, HomeUserConnections::HomeId)
                            .to(Homes::Table, Homes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create rooms table
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(pk_auto(Rooms::Id))
                    .col(integer(Rooms::HomeId))
                    .col(string(Rooms::Name))
                    .col(string(Rooms::Description).default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_home")
                            .from(Rooms::Table, Rooms::HomeId)
                            .to(Homes::Table, Homes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create asset_details table
        manager
            .create_table(
                Table::create()
                    .table(AssetDetails::Table)
                    .if_not_exists()
                    .col(pk_auto(AssetDetails::Id))
                    .col(string(AssetDetails::Name))
                    .col(string(AssetDetails::Brand).default(""))
                    .col(string(AssetDetails::ModelNumber).default(""))
                    .col(string_len_null(AssetDetails::Owner, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_details_owner")
                            .from(AssetDetails::Table, AssetDetails::Owner)
                            .to(AppUsers::Table, AppUsers::Username)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create assets table
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(pk_auto(Assets::Id))
                    .col(integer(Assets::RoomId))
                    .col(integer_null(Assets::DetailsId))
                    .col(string(Assets::Name))
                    .col(string_len(Assets::Category, 20).default("general"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_room")
                            .from(Assets::Table, Assets::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_details")
                            .from(Assets::Table, Assets::DetailsId)
                            .to(AssetDetails::Table, AssetDetails::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create consumable_details table
        manager
            .create_table(
                Table::create()
                    .table(ConsumableDetails::Table)
                    .if_not_exists()
                    .col(pk_auto(ConsumableDetails::Id))
                    .col(string(ConsumableDetails::Name))
                    .col(string(ConsumableDetails::Brand).default(""))
                    .col(string(ConsumableDetails::PartNumber).default(""))
                    .col(string_len_null(ConsumableDetails::Owner, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consumable_details_owner")
                            .from(ConsumableDetails::Table, ConsumableDetails::Owner)
                            .to(AppUsers::Table, AppUsers::Username)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create consumables table
        manager
            .create_table(
                Table::create()
                    .table(Consumables::Table)
                    .if_not_exists()
                    .col(pk_auto(Consumables::Id))
                    .col(integer(Consumables::AssetId))
                    .col(integer_null(Consumables::DetailsId))
                    .col(string(Consumables::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consumables_asset")
                            .from(Consumables::Table, Consumables::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consumables_details")
                            .from(Consumables::Table, Consumables::DetailsId)
                            .to(ConsumableDetails::Table, ConsumableDetails::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create tasks table
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(integer(Tasks::HomeId))
                    .col(integer_null(Tasks::RoomId))
                    .col(integer_null(Tasks::AssetId))
                    .col(integer_null(Tasks::ConsumableId))
                    .col(string(Tasks::Name))
                    .col(string_len(Tasks::Interval, 20).default("one-time"))
                    .col(date_null(Tasks::NextDueDate))
                    .col(date_null(Tasks::LastCompletedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_home")
                            .from(Tasks::Table, Tasks::HomeId)
                            .to(Homes::Table, Homes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_room")
                            .from(Tasks::Table, Tasks::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_asset")
                            .from(Tasks::Table, Tasks::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_consumable")
                            .from(Tasks::Table, Tasks::ConsumableId)
                            .to(Consumables::Table, Consumables::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the due-soon listing
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_home_next_due")
                    .table(Tasks::Table)
                    .col(Tasks::HomeId)
                    .col(Tasks::NextDueDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create logs table
        manager
            .create_table(
                Table::create()
                    .table(Logs::Table)
                    .if_not_exists()
                    .col(pk_auto(Logs::Id))
                    .col(integer(Logs::TaskId))
                    .col(date_null(Logs::CompletionDate))
                    .col(decimal_null(Logs::Cost).decimal_len(16, 4))
                    .col(text(Logs::Notes).default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_task")
                            .from(Logs::Table, Logs::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order of creation to respect foreign key constraints
        manager
            .drop_table(Table::drop().table(Logs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Consumables::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ConsumableDetails::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AssetDetails::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(HomeUserConnections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Homes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AppUsers::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum AppUsers {
    Table,
    Username,
    Email,
    PasswordHash,
}

#[derive(DeriveIden)]
enum Homes {
    Table,
    Id,
    Name,
    Address,
    City,
    State,
    ZipCode,
}

#[derive(DeriveIden)]
enum HomeUserConnections {
    Table,
    Username,
    HomeId,
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
    HomeId,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum AssetDetails {
    Table,
    Id,
    Name,
    Brand,
    ModelNumber,
    Owner,
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
    RoomId,
    DetailsId,
    Name,
    Category,
}

#[derive(DeriveIden)]
enum ConsumableDetails {
    Table,
    Id,
    Name,
    Brand,
    PartNumber,
    Owner,
}

#[derive(DeriveIden)]
enum Consumables {
    Table,
    Id,
    AssetId,
    DetailsId,
    Name,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    HomeId,
    RoomId,
    AssetId,
    ConsumableId,
    Name,
    Interval,
    NextDueDate,
    LastCompletedDate,
}

#[derive(DeriveIden)]
enum Logs {
    Table,
    Id,
    TaskId,
    CompletionDate,
    Cost,
    Notes,
}
