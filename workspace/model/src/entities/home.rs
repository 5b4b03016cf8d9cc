use sea_orm::entity::prelude::*;

/// A physical residence. Users reach it through `home_user_connection`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "homes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    /// Two-letter state code, upper-cased. Empty when unknown.
    pub state: String,
    /// Five digit or ZIP+4 postal code. Empty when unknown.
    pub zip_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room::Entity")]
    Room,
    #[sea_orm(has_many = "super::task::Entity")]
    Task,
    #[sea_orm(has_many = "super::home_user_connection::Entity")]
    HomeUserConnection,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        super::home_user_connection::Relation::AppUser.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::home_user_connection::Relation::Home.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
