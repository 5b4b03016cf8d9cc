//! DIY project catalog: search, detail lookup and bulk loading.

use model::entities::{asset_details, diy_project, project_step};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr},
};
use tracing::{debug, info, warn};

mod seed;

/// A project ready to be stored, steps in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub avg_price: Option<Decimal>,
    pub estimated_time_minutes: Option<i32>,
    pub is_rental_safe: bool,
    pub requires_drilling: bool,
    pub materials: Vec<String>,
    pub tools: Vec<String>,
    pub steps: Vec<NewStep>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStep {
    pub step_number: i32,
    pub instruction_text: String,
}

impl NewStep {
    /// Numbers plain instruction texts from 1.
    pub fn numbered<S: AsRef<str>>(texts: &[S]) -> Vec<NewStep> {
        texts
            .iter()
            .zip(1..)
            .map(|(text, step_number)| NewStep {
                step_number,
                instruction_text: text.as_ref().to_string(),
            })
            .collect()
    }
}

/// Inserts a project with its steps. `step_count` always equals the number
/// of steps stored. Callers own the transaction.
pub async fn insert_project<C: ConnectionTrait>(
    conn: &C,
    project: NewProject,
) -> Result<diy_project::Model, DbErr> {
    let step_count = i32::try_from(project.steps.len()).unwrap_or(i32::MAX);

    let stored = diy_project::ActiveModel {
        title: Set(project.title),
        description: Set(project.description),
        avg_price: Set(project.avg_price),
        step_count: Set(step_count),
        estimated_time_minutes: Set(project.estimated_time_minutes),
        is_rental_safe: Set(project.is_rental_safe),
        requires_drilling: Set(project.requires_drilling),
        materials_json: Set(diy_project::encode_list(&project.materials)),
        tools_json: Set(diy_project::encode_list(&project.tools)),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    for step in project.steps {
        project_step::ActiveModel {
            project_id: Set(stored.id),
            step_number: Set(step.step_number),
            instruction_text: Set(step.instruction_text),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }

    debug!("Stored project {} '{}' with {} steps", stored.id, stored.title, step_count);
    Ok(stored)
}

/// LIKE pattern matching `needle` anywhere. `%`, `_` and the `\` escape
/// itself are matched literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring search over title, description and materials.
/// A blank query matches nothing.
pub async fn search_projects(
    db: &DatabaseConnection,
    query: &str,
) -> Result<Vec<diy_project::Model>, DbErr> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = contains_pattern(&query.to_lowercase());
    let matches_any = [
        diy_project::Column::Title,
        diy_project::Column::Description,
        diy_project::Column::MaterialsJson,
    ]
    .into_iter()
    .fold(Condition::any(), |condition, column| {
        condition.add(
            Expr::expr(Func::lower(Expr::col(column)))
                .like(LikeExpr::new(pattern.as_str()).escape('\\')),
        )
    });

    diy_project::Entity::find()
        .filter(matches_any)
        .order_by_asc(diy_project::Column::Title)
        .all(db)
        .await
}

/// A project and its steps in `step_number` order.
pub async fn project_with_steps(
    db: &DatabaseConnection,
    project_id: i32,
) -> Result<Option<(diy_project::Model, Vec<project_step::Model>)>, DbErr> {
    let Some(project) = diy_project::Entity::find_by_id(project_id).one(db).await? else {
        return Ok(None);
    };

    let steps = project
        .find_related(project_step::Entity)
        .order_by_asc(project_step::Column::StepNumber)
        .all(db)
        .await?;
    Ok(Some((project, steps)))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Stores the built-in demo projects, skipping titles that already exist.
/// All or nothing.
pub async fn seed_projects(db: &DatabaseConnection) -> Result<SeedReport, DbErr> {
    let mut report = SeedReport::default();

    let txn = db.begin().await?;
    for project in seed::demo_projects() {
        let exists = diy_project::Entity::find()
            .filter(diy_project::Column::Title.eq(project.title.as_str()))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            warn!("Project '{}' already exists, skipping", project.title);
            report.skipped.push(project.title);
            continue;
        }

        let stored = insert_project(&txn, project).await?;
        info!("Created project: {}", stored.title);
        report.created.push(stored.title);
    }
    txn.commit().await?;

    Ok(report)
}

/// Makes sure every built-in stored asset exists. Returns how many were added.
pub async fn load_stored_assets(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let mut added = 0;

    for (name, brand, model_number) in seed::STORED_ASSETS {
        let exists = asset_details::Entity::find()
            .filter(asset_details::Column::Owner.is_null())
            .filter(asset_details::Column::Name.eq(*name))
            .filter(asset_details::Column::Brand.eq(*brand))
            .filter(asset_details::Column::ModelNumber.eq(*model_number))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        asset_details::ActiveModel {
            name: Set(name.to_string()),
            brand: Set(brand.to_string()),
            model_number: Set(model_number.to_string()),
            owner: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
        added += 1;
    }

    info!("Stored asset catalog loaded, {} new entries", added);
    Ok(added)
}
