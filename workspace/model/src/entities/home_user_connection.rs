use super::{app_user, home};
use sea_orm::entity::prelude::*;

/// Join table linking users to the homes they may manage.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "home_user_connections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub home_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "app_user::Entity",
        from = "Column::Username",
        to = "app_user::Column::Username",
        on_delete = "Cascade"
    )]
    AppUser,
    #[sea_orm(
        belongs_to = "home::Entity",
        from = "Column::HomeId",
        to = "home::Column::Id",
        on_delete = "Cascade"
    )]
    Home,
}

impl Related<home::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Home.def()
    }
}

impl Related<app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
