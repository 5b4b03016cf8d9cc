//! Pure scheduling logic for maintenance tasks.

pub mod due_soon;
pub mod recurrence;

pub use due_soon::{DUE_SOON_LIMIT, due_soon, is_overdue};
pub use recurrence::{compute_next_due_date, interval_days, next_due_date};
