use sea_orm::entity::prelude::*;

/// One numbered instruction of a DIY project.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "project_steps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: i32,
    pub step_number: i32,
    #[sea_orm(column_type = "Text")]
    pub instruction_text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::diy_project::Entity",
        from = "Column::ProjectId",
        to = "super::diy_project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<super::diy_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
