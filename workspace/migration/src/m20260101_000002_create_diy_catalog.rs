use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::{diy_project, project_step};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create diy_projects table
        manager
            .create_table(
                Table::create()
                    .table(DiyProject::table())
                    .if_not_exists()
                    .col(pk_auto(DiyProject::column(diy_project::Column::Id)))
                    .col(string_uniq(DiyProject::column(diy_project::Column::Title)))
                    .col(text(DiyProject::column(diy_project::Column::Description)).default(""))
                    .col(
                        decimal_null(DiyProject::column(diy_project::Column::AvgPrice))
                            .decimal_len(10, 2),
                    )
                    .col(integer(DiyProject::column(diy_project::Column::StepCount)).default(0))
                    .col(integer_null(DiyProject::column(
                        diy_project::Column::EstimatedTimeMinutes,
                    )))
                    .col(boolean(DiyProject::column(diy_project::Column::IsRentalSafe)).default(false))
                    .col(
                        boolean(DiyProject::column(diy_project::Column::RequiresDrilling))
                            .default(false),
                    )
                    .col(text(DiyProject::column(diy_project::Column::MaterialsJson)).default("[]"))
                    .col(text(DiyProject::column(diy_project::Column::ToolsJson)).default("[]"))
                    .to_owned(),
            )
            .await?;

        // Create project_steps table
        manager
            .create_table(
                Table::create()
                    .table(ProjectStep::table())
                    .if_not_exists()
                    .col(pk_auto(ProjectStep::column(project_step::Column::Id)))
                    .col(integer(ProjectStep::column(project_step::Column::ProjectId)))
                    .col(integer(ProjectStep::column(project_step::Column::StepNumber)))
                    .col(text(ProjectStep::column(project_step::Column::InstructionText)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_steps_project")
                            .from(
                                ProjectStep::table(),
                                ProjectStep::column(project_step::Column::ProjectId),
                            )
                            .to(
                                DiyProject::table(),
                                DiyProject::column(diy_project::Column::Id),
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_steps_project_number")
                    .table(ProjectStep::table())
                    .col(ProjectStep::column(project_step::Column::ProjectId))
                    .col(ProjectStep::column(project_step::Column::StepNumber))
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectStep::table()).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DiyProject::table()).to_owned())
            .await?;

        Ok(())
    }
}
