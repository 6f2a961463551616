//! Daily selection policy helpers.
//!
//! The focus list ("Daily 3") holds at most [`DAILY_CAPACITY`] active
//! tasks, ordered by `daily3_order` ascending with unordered tasks last.
//! Calendar-day logic (maintenance markers, streaks) uses the local
//! timezone; timestamps are stored in UTC.

use crate::models::Task;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::collections::HashSet;

/// Focus slot capacity. Enforced by `set_daily3`.
pub const DAILY_CAPACITY: usize = 3;

/// Filters and orders an owner's task snapshot into the active focus list.
///
/// Active = flagged for the focus list and not completed. Tasks without an
/// order value sort after ordered ones, stable among themselves.
pub fn active_focus_list(tasks: &[Task]) -> Vec<&Task> {
    let mut active: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.is_daily3 && !t.completed)
        .collect();
    active.sort_by_key(|t| t.daily3_order.unwrap_or(i64::MAX));
    active
}

/// UTC instant at which the current local calendar day began.
pub fn start_of_local_day(now: DateTime<Local>) -> DateTime<Utc> {
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| now.naive_local());
    match Local.from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.with_timezone(&Utc)
        }
        // DST gap at midnight: fall back to the instant itself
        chrono::LocalResult::None => now.with_timezone(&Utc),
    }
}

/// Local calendar date of a stored UTC timestamp.
pub fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// Consecutive calendar days ending today on which at least one task was
/// completed. Walks backward from `today` and stops at the first gap, so a
/// day without completions yields 0.
pub fn streak_ending(today: NaiveDate, completion_days: &HashSet<NaiveDate>) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while completion_days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
