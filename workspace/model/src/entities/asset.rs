use sea_orm::entity::prelude::*;

/// Broad kind of a tracked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AssetCategory {
    #[sea_orm(string_value = "appliance")]
    Appliance,
    #[sea_orm(string_value = "furniture")]
    Furniture,
    #[sea_orm(string_value = "general")]
    General,
}

impl AssetCategory {
    /// Parses a form value. Anything unrecognized falls back to `General`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "appliance" => Self::Appliance,
            "furniture" => Self::Furniture,
            _ => Self::General,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Appliance => "appliance",
            Self::Furniture => "furniture",
            Self::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Appliance => "Appliance",
            Self::Furniture => "Furniture",
            Self::General => "General",
        }
    }
}

/// A physical item placed in a room, optionally backed by a details record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub room_id: i32,
    pub details_id: Option<i32>,
    pub name: String,
    pub category: AssetCategory,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_delete = "Cascade"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::asset_details::Entity",
        from = "Column::DetailsId",
        to = "super::asset_details::Column::Id",
        on_delete = "SetNull"
    )]
    Details,
    #[sea_orm(has_many = "super::consumable::Entity")]
    Consumable,
    #[sea_orm(has_many = "super::task::Entity")]
    Task,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::asset_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl Related<super::consumable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumable.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
