use sea_orm::entity::prelude::*;

/// A person using the tracker. The username doubles as the primary key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "app_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never the plain password.
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::home_user_connection::Entity")]
    HomeUserConnection,
    /// Custom asset details created by this user.
    #[sea_orm(has_many = "super::asset_details::Entity")]
    AssetDetails,
    #[sea_orm(has_many = "super::consumable_details::Entity")]
    ConsumableDetails,
}

impl Related<super::home::Entity> for Entity {
    fn to() -> RelationDef {
        super::home_user_connection::Relation::Home.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::home_user_connection::Relation::AppUser.def().rev())
    }
}

impl Related<super::home_user_connection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HomeUserConnection.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
