use sea_orm::entity::prelude::*;

/// A catalog entry describing a make and model.
///
/// Rows with `owner == None` are the stored catalog shipped with the
/// application; rows with an owner are custom entries made by that user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "asset_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub model_number: String,
    pub owner: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::Owner",
        to = "super::app_user::Column::Username",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::asset::Entity")]
    Asset,
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl Model {
    /// True for entries of the shipped catalog.
    pub fn is_stored(&self) -> bool {
        self.owner.is_none()
    }
}

impl ActiveModelBehavior for ActiveModel {}
