//! Selection of the tasks shown in the "due soon" panel.

use chrono::NaiveDate;
use model::entities::task;

/// How many upcoming tasks the dashboard surfaces.
pub const DUE_SOON_LIMIT: usize = 5;

/// Tasks with a due date, earliest first, capped at `limit`.
///
/// Ties keep their input order.
pub fn due_soon(tasks: &[task::Model], limit: usize) -> Vec<task::Model> {
    let mut scheduled: Vec<&task::Model> =
        tasks.iter().filter(|t| t.next_due_date.is_some()).collect();
    scheduled.sort_by_key(|t| t.next_due_date);
    scheduled.into_iter().take(limit).cloned().collect()
}

pub fn is_overdue(task: &task::Model, today: NaiveDate) -> bool {
    matches!(task.next_due_date, Some(due) if due < today)
}
