use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A how-to guide from the DIY catalog.
///
/// Materials and tools are JSON arrays of strings kept as text so that the
/// keyword search can match inside them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "diy_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub avg_price: Option<Decimal>,
    pub step_count: i32,
    pub estimated_time_minutes: Option<i32>,
    pub is_rental_safe: bool,
    pub requires_drilling: bool,
    #[sea_orm(column_type = "Text")]
    pub materials_json: String,
    #[sea_orm(column_type = "Text")]
    pub tools_json: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_step::Entity")]
    ProjectStep,
}

impl Related<super::project_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectStep.def()
    }
}

impl Model {
    pub fn materials(&self) -> Vec<String> {
        decode_list(&self.materials_json)
    }

    pub fn tools(&self) -> Vec<String> {
        decode_list(&self.tools_json)
    }
}

/// Serializes a string list for the `*_json` columns.
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

fn decode_list(raw: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Ignoring malformed list column {:?}: {}", raw, e);
            Vec::new()
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
