// TUI application state
//
// Owns the per-view state, applies optimistic mutations when keys are
// pressed, spawns API tasks, and folds their completion messages back in.
// Views render from this state only; nothing here touches the terminal.
//
// The optimistic pattern is always the same: apply the tentative state
// transition, issue the request, and on failure apply the exact inverse
// (calendar cells) or re-fetch the authoritative state (habit deletes).

use super::input::InputHandler;
use super::theme::{Theme, ThemeKind};
use crate::api::ApiClient;
use crate::config::Config;
use crate::dates;
use crate::logging::LogBuffer;
use crate::messages::{ApiMsg, CalendarSnapshot};
use crate::models::{Frequency, Habit, MonthlyStats, NewHabit, RangeStats};
use anyhow::{bail, Result};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::time::Instant;
use tokio::sync::mpsc;

/// The three views of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Habits,
    Stats,
    Calendar,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Habits => "Habits",
            View::Stats => "Stats",
            View::Calendar => "Calendar",
        }
    }
}

// ─── Habits view ─────────────────────────────────────────────────────────────

/// Focus cycle within the habits view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HabitsFocus {
    #[default]
    Name,
    Description,
    Frequency,
    List,
}

impl HabitsFocus {
    pub fn next(self) -> Self {
        match self {
            HabitsFocus::Name => HabitsFocus::Description,
            HabitsFocus::Description => HabitsFocus::Frequency,
            HabitsFocus::Frequency => HabitsFocus::List,
            HabitsFocus::List => HabitsFocus::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            HabitsFocus::Name => HabitsFocus::List,
            HabitsFocus::Description => HabitsFocus::Name,
            HabitsFocus::Frequency => HabitsFocus::Description,
            HabitsFocus::List => HabitsFocus::Frequency,
        }
    }
}

/// Create-habit form contents
#[derive(Debug, Clone, Default)]
pub struct HabitForm {
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
}

impl HabitForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn to_request(&self) -> NewHabit {
        NewHabit {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            frequency: self.frequency,
        }
    }
}

/// State of the habits view: idle -> loading -> (loaded | error)
#[derive(Debug, Default)]
pub struct HabitsState {
    pub habits: Vec<Habit>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
    pub focus: HabitsFocus,
    pub form: HabitForm,
}

impl HabitsState {
    pub fn selected_habit(&self) -> Option<&Habit> {
        self.habits.get(self.selected)
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.habits.len() {
            self.selected = self.habits.len().saturating_sub(1);
        }
    }
}

// ─── Stats view ──────────────────────────────────────────────────────────────

/// Focusable input field in the stats view. Year/Month drive the monthly
/// query, Start/End the range query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsField {
    Year,
    Month,
    Start,
    End,
}

impl StatsField {
    pub fn next(self) -> Self {
        match self {
            StatsField::Year => StatsField::Month,
            StatsField::Month => StatsField::Start,
            StatsField::Start => StatsField::End,
            StatsField::End => StatsField::Year,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            StatsField::Year => StatsField::End,
            StatsField::Month => StatsField::Year,
            StatsField::Start => StatsField::Month,
            StatsField::End => StatsField::Start,
        }
    }

    /// Whether this field belongs to the monthly panel.
    pub fn is_monthly(self) -> bool {
        matches!(self, StatsField::Year | StatsField::Month)
    }
}

/// State of the stats view: two independent query panels
#[derive(Debug)]
pub struct StatsState {
    pub year: i32,
    pub month: u32,
    pub monthly: MonthlyStats,

    pub start: NaiveDate,
    pub end: NaiveDate,
    pub range: RangeStats,

    pub focus: StatsField,
    /// Monthly stats are loaded once on first entry, never on input change.
    pub loaded_once: bool,
}

impl StatsState {
    fn new(today: NaiveDate) -> Self {
        // Range defaults to the current month, like the original form.
        let (start, end) = dates::month_bounds(today.year(), today.month())
            .unwrap_or((today, today));
        Self {
            year: today.year(),
            month: today.month(),
            monthly: MonthlyStats::new(),
            start,
            end,
            range: RangeStats::new(),
            focus: StatsField::Year,
            loaded_once: false,
        }
    }

    /// Adjust the focused field by `delta` steps (years, months clamped to
    /// 1-12, or days). No query is issued; Load is always explicit.
    pub fn adjust(&mut self, delta: i64) {
        match self.focus {
            StatsField::Year => self.year = (self.year as i64 + delta) as i32,
            StatsField::Month => {
                self.month = (self.month as i64 + delta).clamp(1, 12) as u32;
            }
            StatsField::Start => self.start += Duration::days(delta),
            StatsField::End => self.end += Duration::days(delta),
        }
    }
}

// ─── Calendar view ───────────────────────────────────────────────────────────

/// State of the calendar view: a day x habit grid for one month
#[derive(Debug)]
pub struct CalendarState {
    pub year: i32,
    pub month: u32,
    pub habits: Vec<Habit>,
    /// habit id -> set of dates the habit is marked complete on. Cell
    /// checked state is purely membership in this set.
    pub marked: HashMap<i64, BTreeSet<NaiveDate>>,
    /// 1-based day under the cursor
    pub cursor_day: u32,
    /// Index into `habits` under the cursor
    pub cursor_habit: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl CalendarState {
    fn new(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            habits: Vec::new(),
            marked: HashMap::new(),
            cursor_day: today.day(),
            cursor_habit: 0,
            loading: false,
            error: None,
        }
    }

    pub fn is_marked(&self, habit_id: i64, date: NaiveDate) -> bool {
        self.marked
            .get(&habit_id)
            .is_some_and(|set| set.contains(&date))
    }

    /// Flip a cell and return the new marked state (the optimistic state).
    pub fn toggle(&mut self, habit_id: i64, date: NaiveDate) -> bool {
        let set = self.marked.entry(habit_id).or_default();
        if set.contains(&date) {
            set.remove(&date);
            false
        } else {
            set.insert(date);
            true
        }
    }

    /// Force a cell to a known state. Used for the exact revert when a
    /// mark/unmark call fails.
    pub fn set_marked(&mut self, habit_id: i64, date: NaiveDate, marked: bool) {
        let set = self.marked.entry(habit_id).or_default();
        if marked {
            set.insert(date);
        } else {
            set.remove(&date);
        }
    }

    /// The date under the cursor, if the cursor is on a valid day.
    pub fn cursor_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.cursor_day)
    }

    pub fn days(&self) -> u32 {
        dates::days_in_month(self.year, self.month)
    }

    fn clamp_cursor(&mut self) {
        self.cursor_day = self.cursor_day.clamp(1, self.days());
        if self.cursor_habit >= self.habits.len() {
            self.cursor_habit = self.habits.len().saturating_sub(1);
        }
    }

    /// Move the cursor by (day delta, habit delta), clamped to the grid.
    pub fn move_cursor(&mut self, day_delta: i32, habit_delta: i32) {
        let days = self.days() as i32;
        self.cursor_day = (self.cursor_day as i32 + day_delta).clamp(1, days) as u32;
        if !self.habits.is_empty() {
            let max = self.habits.len() as i32 - 1;
            self.cursor_habit =
                (self.cursor_habit as i32 + habit_delta).clamp(0, max) as usize;
        }
    }

    /// Step the visible month, keeping the cursor on a valid day.
    pub fn step_month(&mut self, delta: i32) {
        let mut total = self.year * 12 + (self.month as i32 - 1) + delta;
        // Keep chrono's supported range comfortable
        total = total.max(0);
        self.year = total / 12;
        self.month = (total % 12 + 1) as u32;
        self.clamp_cursor();
    }

    pub fn step_year(&mut self, delta: i32) {
        self.year += delta;
        self.clamp_cursor();
    }
}

// ─── App ─────────────────────────────────────────────────────────────────────

/// Main application state for the TUI
pub struct App {
    pub view: View,
    pub habits: HabitsState,
    pub stats: StatsState,
    pub calendar: CalendarState,

    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Backend base URL, shown in the status bar
    pub api_label: String,

    pub should_quit: bool,
    pub start_time: Instant,
    pub log_buffer: LogBuffer,

    input: InputHandler,
    api: ApiClient,
    tx: mpsc::Sender<ApiMsg>,
}

impl App {
    pub fn new(
        api: ApiClient,
        tx: mpsc::Sender<ApiMsg>,
        log_buffer: LogBuffer,
        config: &Config,
    ) -> Self {
        let today = dates::today();
        let theme_kind = ThemeKind::parse(&config.theme);
        Self {
            view: View::default(),
            habits: HabitsState::default(),
            stats: StatsState::new(today),
            calendar: CalendarState::new(today),
            theme_kind,
            theme: theme_kind.theme(),
            api_label: config.api_url.clone(),
            should_quit: false,
            start_time: Instant::now(),
            log_buffer,
            input: InputHandler::default(),
            api,
            tx,
        }
    }

    /// Switch views. Entering the calendar always reloads it; entering
    /// stats loads the monthly counts once.
    pub fn set_view(&mut self, view: View) {
        if self.view == view {
            return;
        }
        self.view = view;
        match view {
            View::Calendar => self.load_calendar(),
            View::Stats if !self.stats.loaded_once => {
                self.stats.loaded_once = true;
                self.load_monthly();
            }
            _ => {}
        }
    }

    pub fn next_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
    }

    /// True while the habits form has a text field focused; typed characters
    /// then belong to the field, not to shortcuts.
    pub fn text_input_active(&self) -> bool {
        self.view == View::Habits
            && matches!(
                self.habits.focus,
                HabitsFocus::Name | HabitsFocus::Description
            )
    }

    pub fn handle_key_press(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.input.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: crossterm::event::KeyCode) {
        self.input.handle_key_release(key);
    }

    /// Uptime as HH:MM:SS for the status bar
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    // ── Actions: each spawns one API task reporting back over the channel ──

    fn spawn_api<F>(&self, fut: F)
    where
        F: Future<Output = ApiMsg> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(fut.await).await;
        });
    }

    /// Reload the habit list from the server.
    pub fn reload_habits(&mut self) {
        self.habits.loading = true;
        self.habits.error = None;
        let api = self.api.clone();
        self.spawn_api(async move { ApiMsg::Habits(api.list_habits().await) });
    }

    /// Submit the create form. The form is cleared only when the create
    /// settles successfully.
    pub fn submit_form(&mut self) {
        if self.habits.form.name.trim().is_empty() {
            self.habits.error = Some("Name is required".to_string());
            return;
        }
        let body = self.habits.form.to_request();
        let api = self.api.clone();
        self.spawn_api(async move { ApiMsg::Created(api.create_habit(&body).await) });
    }

    /// Delete the habit under the list cursor: removed from local state
    /// immediately, converged via reload if the call fails.
    pub fn delete_selected(&mut self) {
        let Some(habit) = self.habits.selected_habit() else {
            return;
        };
        let id = habit.id;
        self.habits.habits.retain(|h| h.id != id);
        self.habits.clamp_selection();
        let api = self.api.clone();
        self.spawn_api(async move {
            ApiMsg::Deleted {
                id,
                result: api.delete_habit(id).await,
            }
        });
    }

    /// Mark the selected habit for today (server-determined date), then
    /// reload the whole list. No optimistic update.
    pub fn mark_selected_today(&mut self) {
        let Some(habit) = self.habits.selected_habit() else {
            return;
        };
        let id = habit.id;
        let api = self.api.clone();
        self.spawn_api(async move {
            ApiMsg::Habits(
                async {
                    api.mark_habit(id).await?;
                    api.list_habits().await
                }
                .await,
            )
        });
    }

    /// Mark the selected habit for yesterday, then reload the whole list.
    pub fn mark_selected_yesterday(&mut self) {
        let Some(habit) = self.habits.selected_habit() else {
            return;
        };
        let id = habit.id;
        let date = dates::yesterday();
        let api = self.api.clone();
        self.spawn_api(async move {
            ApiMsg::Habits(
                async {
                    api.mark_habit_on(id, date).await?;
                    api.list_habits().await
                }
                .await,
            )
        });
    }

    /// Explicit Load for the monthly stats panel.
    pub fn load_monthly(&mut self) {
        let (year, month) = (self.stats.year, self.stats.month);
        let api = self.api.clone();
        self.spawn_api(async move { ApiMsg::Monthly(api.monthly_stats(year, month).await) });
    }

    /// Explicit Load for the range stats panel. The range is sent as-is,
    /// even when end precedes start.
    pub fn load_range(&mut self) {
        let (start, end) = (self.stats.start, self.stats.end);
        let api = self.api.clone();
        self.spawn_api(async move { ApiMsg::Range(api.range_stats(start, end).await) });
    }

    /// Bulk load for the calendar: habit list plus one log fetch per habit
    /// for the visible month.
    pub fn load_calendar(&mut self) {
        self.calendar.loading = true;
        self.calendar.error = None;
        let (year, month) = (self.calendar.year, self.calendar.month);
        let api = self.api.clone();
        self.spawn_api(async move {
            ApiMsg::Calendar(load_calendar_snapshot(api, year, month).await)
        });
    }

    /// Toggle the calendar cell under the cursor: optimistic flip, then the
    /// matching mark/unmark call.
    pub fn toggle_cursor_cell(&mut self) {
        let Some(date) = self.calendar.cursor_date() else {
            return;
        };
        let Some(habit) = self.calendar.habits.get(self.calendar.cursor_habit) else {
            return;
        };
        let habit_id = habit.id;
        let marked = self.calendar.toggle(habit_id, date);
        let api = self.api.clone();
        self.spawn_api(async move {
            let result = if marked {
                api.mark_habit_on(habit_id, date).await
            } else {
                api.unmark_habit_on(habit_id, date).await
            };
            ApiMsg::ToggleSettled {
                habit_id,
                date,
                marked,
                result,
            }
        });
    }

    /// Step the calendar month and reload for the new month.
    pub fn calendar_step_month(&mut self, delta: i32) {
        self.calendar.step_month(delta);
        self.load_calendar();
    }

    /// Step the calendar year and reload.
    pub fn calendar_step_year(&mut self, delta: i32) {
        self.calendar.step_year(delta);
        self.load_calendar();
    }

    // ── Message application ──

    /// Fold a settled API call back into view state. Messages apply in
    /// settle order; overlapping actions are not sequenced (last one wins).
    pub fn apply(&mut self, msg: ApiMsg) {
        match msg {
            ApiMsg::Habits(Ok(list)) => {
                self.habits.habits = list;
                self.habits.loading = false;
                self.habits.error = None;
                self.habits.clamp_selection();
            }
            ApiMsg::Habits(Err(e)) => {
                self.habits.loading = false;
                self.habits.error = Some(e.to_string());
            }
            ApiMsg::Created(Ok(habit)) => {
                tracing::debug!("created habit {:?} (id {})", habit.name, habit.id);
                self.habits.form.clear();
                self.reload_habits();
            }
            ApiMsg::Created(Err(e)) => {
                // Form contents stay so the user can fix and resubmit
                self.habits.error = Some(e.to_string());
            }
            ApiMsg::Deleted { result: Ok(()), .. } => {}
            ApiMsg::Deleted { id, result: Err(e) } => {
                // The optimistic removal may be wrong; converge on the
                // server's list rather than patching locally
                tracing::warn!("delete of habit {id} failed: {e}");
                self.habits.error = Some(e.to_string());
                self.reload_habits();
            }
            ApiMsg::Monthly(Ok(stats)) => self.stats.monthly = stats,
            ApiMsg::Monthly(Err(e)) => {
                // Prior data stays on screen; the failure is only logged
                tracing::warn!("monthly stats load failed: {e}");
            }
            ApiMsg::Range(Ok(stats)) => self.stats.range = stats,
            ApiMsg::Range(Err(e)) => {
                tracing::warn!("range stats load failed: {e}");
            }
            ApiMsg::Calendar(Ok(snapshot)) => {
                if snapshot.year != self.calendar.year || snapshot.month != self.calendar.month {
                    tracing::debug!(
                        "calendar data for {}-{:02} settled after paging on",
                        snapshot.year,
                        snapshot.month
                    );
                }
                self.calendar.habits = snapshot.habits;
                self.calendar.marked = snapshot.marked;
                self.calendar.loading = false;
                self.calendar.error = None;
                self.calendar.clamp_cursor();
            }
            ApiMsg::Calendar(Err(e)) => {
                self.calendar.loading = false;
                self.calendar.error = Some(e.to_string());
            }
            ApiMsg::ToggleSettled { result: Ok(()), .. } => {
                // The optimistic state was confirmed; a leftover error from
                // an earlier failed toggle is stale now
                self.calendar.error = None;
            }
            ApiMsg::ToggleSettled {
                habit_id,
                date,
                marked,
                result: Err(e),
            } => {
                // Exact revert of the one cell that was flipped
                self.calendar.set_marked(habit_id, date, !marked);
                self.calendar.error = Some(e.to_string());
            }
        }
    }
}

/// Fetch everything the calendar shows for one month: the habit list and,
/// per habit, its logs within the month bounds.
async fn load_calendar_snapshot(
    api: ApiClient,
    year: i32,
    month: u32,
) -> Result<CalendarSnapshot> {
    let Some((start, end)) = dates::month_bounds(year, month) else {
        bail!("Failed to load calendar");
    };
    let habits = api.list_habits().await?;
    let mut marked: HashMap<i64, BTreeSet<NaiveDate>> = HashMap::new();
    for habit in &habits {
        let logs = api.habit_logs(habit.id, start, end).await?;
        marked.insert(habit.id, logs.into_iter().map(|log| log.date).collect());
    }
    Ok(CalendarSnapshot {
        year,
        month,
        habits,
        marked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn habit(id: i64, name: &str) -> Habit {
        Habit {
            id,
            name: name.to_string(),
            description: String::new(),
            frequency: "DAILY".to_string(),
        }
    }

    /// App wired to a dead port; spawned tasks fail fast and their messages
    /// are ignored unless a test drains the receiver.
    fn test_app() -> (App, mpsc::Receiver<ApiMsg>) {
        let (tx, rx) = mpsc::channel(16);
        let app = App::new(
            ApiClient::new("http://127.0.0.1:9"),
            tx,
            LogBuffer::new(),
            &Config::default(),
        );
        (app, rx)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn delete_removes_habit_immediately() {
        let (mut app, _rx) = test_app();
        app.habits.habits = vec![habit(1, "Read"), habit(2, "Run")];
        app.habits.selected = 0;

        app.delete_selected();

        assert_eq!(app.habits.habits.len(), 1);
        assert_eq!(app.habits.habits[0].id, 2);
    }

    #[tokio::test]
    async fn failed_delete_converges_via_reload() {
        let (mut app, _rx) = test_app();
        app.habits.habits = vec![habit(2, "Run")];

        app.apply(ApiMsg::Deleted {
            id: 1,
            result: Err(anyhow!("Failed to delete habit")),
        });

        assert_eq!(app.habits.error.as_deref(), Some("Failed to delete habit"));
        // A reload of the authoritative list is in flight
        assert!(app.habits.loading);
    }

    #[test]
    fn habit_list_load_clamps_selection() {
        let (mut app, _rx) = test_app();
        app.habits.selected = 5;

        app.apply(ApiMsg::Habits(Ok(vec![habit(1, "Read")])));

        assert_eq!(app.habits.selected, 0);
        assert!(app.habits.error.is_none());
        assert!(!app.habits.loading);
    }

    #[test]
    fn failed_list_load_sets_inline_error() {
        let (mut app, _rx) = test_app();
        app.habits.loading = true;

        app.apply(ApiMsg::Habits(Err(anyhow!("Failed to fetch habits"))));

        assert!(!app.habits.loading);
        assert_eq!(app.habits.error.as_deref(), Some("Failed to fetch habits"));
    }

    #[tokio::test]
    async fn successful_create_clears_form_and_reloads() {
        let (mut app, _rx) = test_app();
        app.habits.form.name = "Read".to_string();
        app.habits.form.description = "20 pages".to_string();

        app.apply(ApiMsg::Created(Ok(habit(1, "Read"))));

        assert!(app.habits.form.name.is_empty());
        assert!(app.habits.form.description.is_empty());
        assert!(app.habits.loading);
    }

    #[test]
    fn failed_create_keeps_form_contents() {
        let (mut app, _rx) = test_app();
        app.habits.form.name = "Read".to_string();

        app.apply(ApiMsg::Created(Err(anyhow!("Failed to create habit"))));

        assert_eq!(app.habits.form.name, "Read");
        assert_eq!(app.habits.error.as_deref(), Some("Failed to create habit"));
    }

    #[tokio::test]
    async fn empty_name_never_reaches_the_network() {
        let (mut app, mut rx) = test_app();
        app.habits.form.name = "   ".to_string();

        app.submit_form();

        assert_eq!(app.habits.error.as_deref(), Some("Name is required"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn toggle_failure_reverts_exactly_to_prior_state() {
        let (mut app, _rx) = test_app();
        let d = date(2024, 3, 5);

        // Unmarked cell: optimistic mark, then failure
        assert!(!app.calendar.is_marked(1, d));
        let marked = app.calendar.toggle(1, d);
        assert!(marked);
        app.apply(ApiMsg::ToggleSettled {
            habit_id: 1,
            date: d,
            marked,
            result: Err(anyhow!("Failed to mark habit on date")),
        });
        assert!(!app.calendar.is_marked(1, d));

        // Marked cell: optimistic unmark, then failure
        app.calendar.set_marked(1, d, true);
        let marked = app.calendar.toggle(1, d);
        assert!(!marked);
        app.apply(ApiMsg::ToggleSettled {
            habit_id: 1,
            date: d,
            marked,
            result: Err(anyhow!("Failed to unmark habit on date")),
        });
        assert!(app.calendar.is_marked(1, d));
    }

    #[test]
    fn successful_toggle_clears_a_prior_toggle_error() {
        let (mut app, _rx) = test_app();
        let d = date(2024, 3, 5);

        let marked = app.calendar.toggle(1, d);
        app.apply(ApiMsg::ToggleSettled {
            habit_id: 1,
            date: d,
            marked,
            result: Err(anyhow!("Failed to mark habit on date")),
        });
        assert!(app.calendar.error.is_some());

        // The retry succeeds; the error must not linger over the grid
        let marked = app.calendar.toggle(1, d);
        app.apply(ApiMsg::ToggleSettled {
            habit_id: 1,
            date: d,
            marked,
            result: Ok(()),
        });
        assert!(app.calendar.error.is_none());
        assert!(app.calendar.is_marked(1, d));
    }

    #[test]
    fn mark_then_unmark_leaves_set_without_date() {
        let (mut app, _rx) = test_app();
        let d = date(2024, 3, 5);

        assert!(app.calendar.toggle(1, d));
        app.apply(ApiMsg::ToggleSettled {
            habit_id: 1,
            date: d,
            marked: true,
            result: Ok(()),
        });
        assert!(app.calendar.is_marked(1, d));

        assert!(!app.calendar.toggle(1, d));
        app.apply(ApiMsg::ToggleSettled {
            habit_id: 1,
            date: d,
            marked: false,
            result: Ok(()),
        });
        assert!(!app.calendar.is_marked(1, d));
    }

    #[test]
    fn failed_stats_load_leaves_prior_data_untouched() {
        let (mut app, _rx) = test_app();
        app.stats.monthly.insert("Read".to_string(), 4);
        app.stats.range.insert(
            "Read".to_string(),
            crate::models::RangeStat {
                completions: 2,
                possible: 4,
                rate: 0.5,
            },
        );

        app.apply(ApiMsg::Monthly(Err(anyhow!(
            "Failed to fetch monthly stats"
        ))));
        app.apply(ApiMsg::Range(Err(anyhow!("Failed to fetch range stats"))));

        assert_eq!(app.stats.monthly.get("Read"), Some(&4));
        assert_eq!(app.stats.range["Read"].completions, 2);
        // And no inline error either: the gap is intentional
        assert!(app.habits.error.is_none());
        assert!(app.calendar.error.is_none());
    }

    #[test]
    fn stale_calendar_snapshot_keeps_user_month() {
        let (mut app, _rx) = test_app();
        app.calendar.year = 2024;
        app.calendar.month = 4;
        app.calendar.cursor_day = 30;

        let mut marked = HashMap::new();
        let mut set = BTreeSet::new();
        set.insert(date(2024, 3, 5));
        marked.insert(1, set);
        app.apply(ApiMsg::Calendar(Ok(CalendarSnapshot {
            year: 2024,
            month: 3,
            habits: vec![habit(1, "Read")],
            marked,
        })));

        // View controls stay user-owned; only the data is replaced
        assert_eq!(app.calendar.month, 4);
        assert!(app.calendar.is_marked(1, date(2024, 3, 5)));
    }

    #[test]
    fn month_spinner_clamps_to_valid_months() {
        let (mut app, _rx) = test_app();
        app.stats.focus = StatsField::Month;

        app.stats.month = 12;
        app.stats.adjust(1);
        assert_eq!(app.stats.month, 12);

        app.stats.month = 1;
        app.stats.adjust(-1);
        assert_eq!(app.stats.month, 1);
    }

    #[test]
    fn range_fields_move_by_days_without_validation() {
        let (mut app, _rx) = test_app();
        app.stats.start = date(2024, 3, 10);
        app.stats.end = date(2024, 3, 1);

        app.stats.focus = StatsField::End;
        app.stats.adjust(-1);

        // End before start is allowed; the backend gets it as-is
        assert_eq!(app.stats.end, date(2024, 2, 29));
        assert!(app.stats.end < app.stats.start);
    }

    #[test]
    fn calendar_month_step_keeps_cursor_on_valid_day() {
        let (mut app, _rx) = test_app();
        app.calendar.year = 2024;
        app.calendar.month = 3;
        app.calendar.cursor_day = 31;

        app.calendar.step_month(-1);

        assert_eq!((app.calendar.year, app.calendar.month), (2024, 2));
        assert_eq!(app.calendar.cursor_day, 29);
    }

    #[tokio::test]
    async fn entering_stats_loads_monthly_only_once() {
        let (mut app, _rx) = test_app();

        app.set_view(View::Stats);
        assert!(app.stats.loaded_once);

        app.set_view(View::Habits);
        app.set_view(View::Stats);
        // Still marked loaded; re-entry issues no automatic query
        assert!(app.stats.loaded_once);
    }
}
