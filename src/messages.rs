// Completion messages from spawned API tasks back to the event loop
//
// Every user action that hits the network runs in its own tokio task; the
// task reports its settled result here over an mpsc channel. Results carry
// the API client's static error so views can surface it inline. Nothing is
// sequenced or cancelled: messages apply in whatever order they settle.

use crate::models::{Habit, MonthlyStats, RangeStats};
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Everything the calendar view needs for one visible month.
#[derive(Debug)]
pub struct CalendarSnapshot {
    pub year: i32,
    pub month: u32,
    pub habits: Vec<Habit>,
    /// habit id -> set of dates that habit was completed on.
    pub marked: HashMap<i64, BTreeSet<NaiveDate>>,
}

/// A settled API call.
#[derive(Debug)]
pub enum ApiMsg {
    /// Habit list (re)loaded. Also the terminal message for the
    /// mark-then-reload chains, so a failed mark lands here as Err.
    Habits(Result<Vec<Habit>>),

    /// Create call settled. Ok clears the form and triggers a reload;
    /// Err keeps the form contents and surfaces the error.
    Created(Result<Habit>),

    /// Delete call settled. The habit was already removed optimistically;
    /// Err converges by re-fetching the authoritative list.
    Deleted { id: i64, result: Result<()> },

    /// Monthly stats query settled.
    Monthly(Result<MonthlyStats>),

    /// Range stats query settled.
    Range(Result<RangeStats>),

    /// Calendar bulk load (habits + per-habit logs) settled.
    Calendar(Result<CalendarSnapshot>),

    /// A single calendar cell toggle settled. `marked` is the optimistic
    /// state that was applied; Err reverts exactly that cell.
    ToggleSettled {
        habit_id: i64,
        date: NaiveDate,
        marked: bool,
        result: Result<()>,
    },
}
