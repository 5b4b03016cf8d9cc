use chrono::NaiveDate;
use compute::next_due_date;
use model::entities::{log, task};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, ModelTrait, Set, TransactionTrait};
use tracing::debug;

use super::{ActionContext, ActionError, ActionOutcome, Schedule, ValidationError, scope};

const CONSUMABLE_MISMATCH: &str = "That consumable belongs to a different asset.";
const ROOM_MISMATCH: &str = "That asset is in a different room.";

/// Creates a task. The task is considered done on its start date and first
/// comes due one interval later.
///
/// A task on a consumable belongs to that consumable's asset, and a task on
/// an asset lives in the asset's room. Any room or asset picked on the form
/// has to agree with that. Tasks without an asset go to the picked room, else
/// the room the dashboard is showing.
pub async fn add_task(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    name: String,
    schedule: Schedule,
    asset_id: Option<i32>,
    room_id: Option<i32>,
    consumable_id: Option<i32>,
) -> Result<ActionOutcome, ActionError> {
    let consumable = match consumable_id {
        Some(id) => Some(scope::consumable(db, ctx.home.id, id).await?),
        None => None,
    };
    let asset_id = match (asset_id, &consumable) {
        (Some(id), Some(c)) if id != c.asset_id => {
            return Err(ValidationError::new(CONSUMABLE_MISMATCH).into());
        }
        (Some(id), _) => Some(id),
        (None, c) => c.as_ref().map(|c| c.asset_id),
    };
    let asset = match asset_id {
        Some(id) => Some(scope::asset(db, ctx.home.id, id).await?),
        None => None,
    };

    let room_id = match (&asset, room_id) {
        (Some(asset), Some(id)) if id != asset.room_id => {
            return Err(ValidationError::new(ROOM_MISMATCH).into());
        }
        (Some(asset), _) => Some(asset.room_id),
        (None, picked) => match picked.or(ctx.selected_room) {
            Some(id) => Some(scope::room(db, ctx.home.id, id).await?.id),
            None => None,
        },
    };

    let task = task::ActiveModel {
        home_id: Set(ctx.home.id),
        room_id: Set(room_id),
        asset_id: Set(asset.map(|a| a.id)),
        consumable_id: Set(consumable.map(|c| c.id)),
        name: Set(name),
        interval: Set(schedule.interval),
        last_completed_date: Set(Some(schedule.start_date)),
        next_due_date: Set(Some(next_due_date(schedule.interval, schedule.start_date))),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!("Created task {} due {:?}", task.id, task.next_due_date);
    Ok(ActionOutcome::done("Task created successfully."))
}

/// Records a completion. A dated log moves the task's schedule forward.
pub async fn add_log(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    task_id: i32,
    completion_date: Option<NaiveDate>,
    cost: Option<Decimal>,
    notes: String,
) -> Result<ActionOutcome, ActionError> {
    let task = scope::task(db, ctx.home.id, task_id, "Pick a valid task for the log.").await?;

    let txn = db.begin().await?;
    log::ActiveModel {
        task_id: Set(task.id),
        completion_date: Set(completion_date),
        cost: Set(cost),
        notes: Set(notes),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(done_on) = completion_date {
        let interval = task.interval;
        let mut active: task::ActiveModel = task.into();
        active.last_completed_date = Set(Some(done_on));
        active.next_due_date = Set(Some(next_due_date(interval, done_on)));
        let updated = active.update(&txn).await?;
        debug!("Task {} now due {:?}", updated.id, updated.next_due_date);
    }
    txn.commit().await?;

    Ok(ActionOutcome::done("Log recorded for task."))
}

pub async fn delete_task(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    task_id: i32,
) -> Result<ActionOutcome, ActionError> {
    let task = scope::task(db, ctx.home.id, task_id, "Task was not found.").await?;
    task.delete(db).await?;
    Ok(ActionOutcome::done("Task deleted."))
}
