//! Day planner state holder.
//!
//! [`Planner`] owns the task store together with the selected date and the
//! day start time. It is the one object a shell talks to: every mutator
//! applies a single change to the store, and every view is recomputed from
//! the store on each call, so derived start/end times can never go stale.
//!
//! Gesture state such as the row being dragged stays with the shell; only
//! the final `(from, to)` pair reaches [`Planner::reorder_scheduled`].

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{PlannerError, StoreError, TimeError};
use crate::stats::{aggregate_by_category, CategoryTotal};
use crate::storage::{Config, TaskStore};
use crate::task::{Task, TaskCategory, TaskPatch, DEFAULT_DURATION_MINUTES};
use crate::timeline::{calculate_blocks_from, minutes_to_time, time_to_minutes, ScheduledTask};

/// Day start used when nothing else is configured, in minutes from midnight (07:00).
pub const DEFAULT_DAY_START_MINUTE: i64 = 7 * 60;

/// Everything a shell renders for the selected date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub day_start: String,
    /// Timeline in display order with computed times
    pub scheduled: Vec<ScheduledTask>,
    pub backlog: Vec<Task>,
    pub allocation: Vec<CategoryTotal>,
    /// Sum of scheduled durations
    pub total_minutes: i64,
    /// End of the last scheduled block, if any
    pub ends_at: Option<String>,
}

/// Mutable planning session: task store, selected date and day start.
#[derive(Debug, Clone)]
pub struct Planner {
    store: TaskStore,
    selected_date: NaiveDate,
    day_start: String,
    day_start_minute: i64,
    default_duration: i32,
}

impl Planner {
    /// Creates an empty planner for `selected_date` starting the day at `day_start`.
    ///
    /// # Errors
    /// Returns [`TimeError::Malformed`] if `day_start` is not `HH:MM`.
    pub fn new(selected_date: NaiveDate, day_start: &str) -> Result<Self, TimeError> {
        Ok(Self {
            store: TaskStore::new(),
            selected_date,
            day_start: day_start.to_string(),
            day_start_minute: time_to_minutes(day_start)?,
            default_duration: DEFAULT_DURATION_MINUTES,
        })
    }

    /// Creates a planner for today's local date with the default day start.
    pub fn today() -> Self {
        Self {
            store: TaskStore::new(),
            selected_date: Local::now().date_naive(),
            day_start: minutes_to_time(DEFAULT_DAY_START_MINUTE),
            day_start_minute: DEFAULT_DAY_START_MINUTE,
            default_duration: DEFAULT_DURATION_MINUTES,
        }
    }

    /// Creates a planner for `date` from user configuration.
    ///
    /// Seeds the sample day when `planner.seed_sample_day` is set.
    ///
    /// # Errors
    /// Returns an error if the configured day start or default duration is invalid.
    pub fn from_config(config: &Config, date: NaiveDate) -> Result<Self, PlannerError> {
        let default_duration = config.planner.default_duration;
        if default_duration < 0 {
            return Err(StoreError::InvalidDuration {
                duration: default_duration,
            }
            .into());
        }

        let mut planner = Self::new(date, &config.planner.day_start)?;
        planner.default_duration = default_duration;
        if config.planner.seed_sample_day {
            planner.seed_sample_day();
        }
        Ok(planner)
    }

    /// Replaces the task store, e.g. with one restored by a persistence layer.
    pub fn with_store(mut self, store: TaskStore) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn day_start(&self) -> &str {
        &self.day_start
    }

    pub fn default_duration(&self) -> i32 {
        self.default_duration
    }

    /// All tasks of the selected date in storage order.
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks(self.selected_date)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.store.get(self.selected_date, id)
    }

    /// Selects the date whose tasks the views and mutators address.
    pub fn select_date(&mut self, date: NaiveDate) {
        debug!(from = %self.selected_date, to = %date, "date selected");
        self.selected_date = date;
    }

    /// Selects a date given as ISO `YYYY-MM-DD`.
    ///
    /// # Errors
    /// Returns [`PlannerError::MalformedDate`] and keeps the current date if
    /// `date` does not parse.
    pub fn set_selected_date(&mut self, date: &str) -> Result<(), PlannerError> {
        let parsed = Self::parse_date(date)?;
        self.select_date(parsed);
        Ok(())
    }

    /// Parses an ISO `YYYY-MM-DD` date as accepted by [`Planner::set_selected_date`].
    ///
    /// # Errors
    /// Returns [`PlannerError::MalformedDate`] if `input` does not parse.
    pub fn parse_date(input: &str) -> Result<NaiveDate, PlannerError> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
            PlannerError::MalformedDate {
                input: input.to_string(),
            }
        })
    }

    /// Moves the selected date by `days`, backward when negative.
    ///
    /// # Errors
    /// Returns [`PlannerError::DateOutOfRange`] if the result is not a valid date.
    pub fn navigate_date(&mut self, days: i64) -> Result<NaiveDate, PlannerError> {
        let from = self.selected_date;
        let step = Days::new(days.unsigned_abs());
        let target = if days >= 0 {
            from.checked_add_days(step)
        } else {
            from.checked_sub_days(step)
        }
        .ok_or(PlannerError::DateOutOfRange { from, days })?;

        self.select_date(target);
        Ok(target)
    }

    /// Changes the time the first scheduled task starts at.
    ///
    /// Order and durations are untouched; every start/end time shifts.
    ///
    /// # Errors
    /// Returns [`TimeError::Malformed`] and keeps the current start if `day_start`
    /// is not `HH:MM`.
    pub fn set_day_start(&mut self, day_start: &str) -> Result<(), TimeError> {
        let minute = time_to_minutes(day_start).inspect_err(|err| {
            warn!(error = %err, "day start rejected");
        })?;
        debug!(from = %self.day_start, to = %day_start, "day start changed");
        self.day_start = day_start.to_string();
        self.day_start_minute = minute;
        Ok(())
    }

    /// Adds a blank task at the end of the selected date and returns it.
    pub fn add_task(&mut self, is_raw: bool) -> Task {
        let task = Task::new(is_raw).with_duration(self.default_duration);
        debug!(date = %self.selected_date, id = %task.id, is_raw, "task added");
        self.store.add_task(self.selected_date, task).clone()
    }

    /// Merges `patch` into the task with `id` on the selected date.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] if the id is unknown; nothing changes.
    /// - [`StoreError::InvalidDuration`] for a negative duration; nothing changes.
    pub fn update_task(&mut self, id: &str, patch: &TaskPatch) -> Result<&Task, StoreError> {
        let date = self.selected_date;
        match self.store.update_task(date, id, patch) {
            Ok(task) => {
                debug!(%date, id, ?patch, "task updated");
                Ok(task)
            }
            Err(err) => {
                log_rejected("update", &err);
                Err(err)
            }
        }
    }

    /// Moves a backlog task onto the timeline.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the id is unknown.
    pub fn schedule_backlog_task(&mut self, id: &str) -> Result<&Task, StoreError> {
        self.update_task(id, &TaskPatch::is_raw(false))
    }

    /// Removes the task with `id` from the selected date.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the id is unknown.
    pub fn delete_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let date = self.selected_date;
        self.store
            .delete_task(date, id)
            .inspect(|_| debug!(%date, id, "task deleted"))
            .inspect_err(|err| log_rejected("delete", err))
    }

    /// Moves the timeline task at `from` to position `to` of the timeline.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidIndex`] if either index is off the timeline.
    pub fn reorder_scheduled(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let date = self.selected_date;
        self.store
            .reorder_scheduled(date, from, to)
            .inspect(|_| debug!(%date, from, to, "timeline reordered"))
            .inspect_err(|err| log_rejected("reorder", err))
    }

    /// Appends the sample day to the selected date. Returns the number of tasks added.
    pub fn seed_sample_day(&mut self) -> usize {
        let sample = [
            ("Morning Routine", 45, TaskCategory::Rest),
            ("Deep Work Session", 180, TaskCategory::Work),
            ("Lunch Break", 60, TaskCategory::Rest),
            ("Team Sync", 30, TaskCategory::Social),
        ];
        for (title, duration, category) in sample {
            let task = Task::new(false)
                .with_title(title)
                .with_duration(duration)
                .with_category(category);
            self.store.add_task(self.selected_date, task);
        }
        debug!(date = %self.selected_date, "sample day seeded");
        sample.len()
    }

    /// Timeline of the selected date with freshly computed start/end times.
    pub fn scheduled(&self) -> Vec<ScheduledTask> {
        calculate_blocks_from(
            self.store.scheduled(self.selected_date),
            self.day_start_minute,
        )
    }

    /// Backlog of the selected date.
    pub fn backlog(&self) -> Vec<Task> {
        self.store.backlog(self.selected_date).cloned().collect()
    }

    /// Scheduled minutes per category, in timeline order of first appearance.
    pub fn allocation(&self) -> Vec<CategoryTotal> {
        aggregate_by_category(&self.scheduled())
    }

    /// All views of the selected date computed from one pass over the store.
    pub fn snapshot(&self) -> DaySnapshot {
        let scheduled = self.scheduled();
        let allocation = aggregate_by_category(&scheduled);
        let total_minutes = scheduled.iter().map(|t| i64::from(t.duration)).sum();
        let ends_at = scheduled.last().map(|t| minutes_to_time(t.end_minute));

        DaySnapshot {
            date: self.selected_date,
            day_start: self.day_start.clone(),
            backlog: self.backlog(),
            scheduled,
            allocation,
            total_minutes,
            ends_at,
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::today()
    }
}

fn log_rejected(operation: &str, err: &StoreError) {
    if err.is_not_found() {
        debug!(operation, error = %err, "mutation ignored");
    } else {
        warn!(operation, error = %err, "mutation rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn planner() -> Planner {
        Planner::new(date(), "07:00").unwrap()
    }

    fn add(planner: &mut Planner, title: &str, duration: i32, category: TaskCategory) -> String {
        let id = planner.add_task(false).id;
        let patch = TaskPatch {
            title: Some(title.into()),
            duration: Some(duration),
            category: Some(category),
            is_raw: None,
        };
        planner.update_task(&id, &patch).unwrap();
        id
    }

    fn starts(planner: &Planner) -> Vec<String> {
        planner.scheduled().into_iter().map(|t| t.start_time).collect()
    }

    #[test]
    fn new_rejects_malformed_day_start() {
        assert!(Planner::new(date(), "7 o'clock").is_err());
    }

    #[test]
    fn added_task_uses_defaults() {
        let mut planner = planner();
        let task = planner.add_task(true);

        assert_eq!(task.duration, 30);
        assert_eq!(task.category, TaskCategory::Other);
        assert!(task.title.is_empty());
        assert_eq!(planner.backlog(), vec![task]);
        assert!(planner.scheduled().is_empty());
    }

    #[test]
    fn seeded_day_matches_sample_timeline() {
        let mut planner = planner();
        assert_eq!(planner.seed_sample_day(), 4);

        let snapshot = planner.snapshot();
        let ends: Vec<_> = snapshot.scheduled.iter().map(|t| t.end_time.as_str()).collect();
        assert_eq!(starts(&planner), ["07:00", "07:45", "10:45", "11:45"]);
        assert_eq!(ends, ["07:45", "10:45", "11:45", "12:15"]);
        assert_eq!(snapshot.total_minutes, 315);
        assert_eq!(snapshot.ends_at.as_deref(), Some("12:15"));

        let allocation: Vec<_> = snapshot
            .allocation
            .iter()
            .map(|t| (t.category, t.total_minutes))
            .collect();
        assert_eq!(
            allocation,
            [
                (TaskCategory::Rest, 105),
                (TaskCategory::Work, 180),
                (TaskCategory::Social, 30)
            ]
        );
    }

    #[test]
    fn changing_day_start_shifts_every_block() {
        let mut planner = planner();
        planner.seed_sample_day();
        let ids_before: Vec<_> = planner.scheduled().into_iter().map(|t| t.task.id).collect();

        planner.set_day_start("08:30").unwrap();

        assert_eq!(starts(&planner), ["08:30", "09:15", "12:15", "13:15"]);
        let ids_after: Vec<_> = planner.scheduled().into_iter().map(|t| t.task.id).collect();
        assert_eq!(ids_before, ids_after);
    }

    #[test]
    fn malformed_day_start_keeps_previous() {
        let mut planner = planner();
        assert!(planner.set_day_start("8:3").is_err());
        assert_eq!(planner.day_start(), "07:00");
    }

    #[test]
    fn duration_edit_recomputes_following_blocks() {
        let mut planner = planner();
        let first = add(&mut planner, "a", 60, TaskCategory::Work);
        add(&mut planner, "b", 30, TaskCategory::Work);

        planner.update_task(&first, &TaskPatch::duration(90)).unwrap();

        assert_eq!(starts(&planner), ["07:00", "08:30"]);
    }

    #[test]
    fn reorder_recomputes_times() {
        let mut planner = planner();
        add(&mut planner, "a", 60, TaskCategory::Work);
        add(&mut planner, "b", 30, TaskCategory::Rest);

        planner.reorder_scheduled(1, 0).unwrap();

        let blocks = planner.scheduled();
        assert_eq!(blocks[0].title, "b");
        assert_eq!(blocks[0].start_time, "07:00");
        assert_eq!(blocks[1].start_time, "07:30");
        assert_eq!(planner.allocation()[0].category, TaskCategory::Rest);
    }

    #[test]
    fn unknown_ids_leave_state_untouched() {
        let mut planner = planner();
        planner.seed_sample_day();
        let before = planner.snapshot();

        assert!(planner.update_task("nope", &TaskPatch::title("x")).unwrap_err().is_not_found());
        assert!(planner.delete_task("nope").unwrap_err().is_not_found());
        assert_eq!(planner.snapshot(), before);
    }

    #[test]
    fn scheduling_backlog_task_puts_it_on_timeline() {
        let mut planner = planner();
        add(&mut planner, "a", 60, TaskCategory::Work);
        let idea = planner.add_task(true).id;

        planner.schedule_backlog_task(&idea).unwrap();

        assert!(planner.backlog().is_empty());
        assert_eq!(starts(&planner), ["07:00", "08:00"]);
    }

    #[test]
    fn dates_keep_separate_plans() {
        let mut planner = planner();
        planner.seed_sample_day();

        let next = planner.navigate_date(1).unwrap();
        assert_eq!(next, NaiveDate::from_ymd_opt(2024, 5, 18).unwrap());
        assert!(planner.scheduled().is_empty());
        planner.add_task(false);

        planner.navigate_date(-1).unwrap();
        assert_eq!(planner.scheduled().len(), 4);
        assert_eq!(planner.store().dates().count(), 2);
    }

    #[test]
    fn set_selected_date_parses_iso_dates() {
        let mut planner = planner();
        planner.set_selected_date("2024-12-31").unwrap();
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

        let err = planner.set_selected_date("31/12/2024").unwrap_err();
        assert_eq!(err, PlannerError::MalformedDate { input: "31/12/2024".into() });
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn parse_date_trims_and_rejects() {
        assert_eq!(Planner::parse_date(" 2024-05-17 "), Ok(date()));
        assert!(matches!(
            Planner::parse_date("2024-02-30"),
            Err(PlannerError::MalformedDate { .. })
        ));
    }

    #[test]
    fn today_agrees_with_config_default() {
        let planner = Planner::today();
        assert_eq!(planner.day_start(), Config::default().planner.day_start);
        assert_eq!(time_to_minutes(planner.day_start()), Ok(DEFAULT_DAY_START_MINUTE));
        assert_eq!(planner.scheduled().len(), 0);

        let mut planner = planner;
        planner.add_task(false);
        assert_eq!(planner.scheduled()[0].start_minute, DEFAULT_DAY_START_MINUTE);
        assert_eq!(planner.scheduled()[0].start_time, "07:00");
    }

    #[test]
    fn navigation_past_calendar_range_fails() {
        let mut planner = Planner::new(NaiveDate::MAX, "07:00").unwrap();
        assert!(matches!(
            planner.navigate_date(1),
            Err(PlannerError::DateOutOfRange { .. })
        ));
        assert_eq!(planner.selected_date(), NaiveDate::MAX);
    }

    #[test]
    fn from_config_applies_preferences() {
        let mut config = Config::default();
        config.planner.day_start = "06:00".into();
        config.planner.default_duration = 25;
        config.planner.seed_sample_day = true;

        let mut planner = Planner::from_config(&config, date()).unwrap();

        assert_eq!(planner.day_start(), "06:00");
        assert_eq!(starts(&planner)[0], "06:00");
        assert_eq!(planner.add_task(false).duration, 25);
    }

    #[test]
    fn from_config_rejects_negative_default_duration() {
        let mut config = Config::default();
        config.planner.default_duration = -1;
        assert!(matches!(
            Planner::from_config(&config, date()),
            Err(PlannerError::Store(StoreError::InvalidDuration { duration: -1 }))
        ));
    }

    #[test]
    fn snapshot_serializes_for_shells() {
        let mut planner = planner();
        planner.seed_sample_day();
        planner.add_task(true);

        let json = serde_json::to_value(planner.snapshot()).unwrap();
        assert_eq!(json["date"], "2024-05-17");
        assert_eq!(json["scheduled"][1]["title"], "Deep Work Session");
        assert_eq!(json["scheduled"][1]["start_time"], "07:45");
        assert_eq!(json["backlog"].as_array().unwrap().len(), 1);
        assert_eq!(json["allocation"][0]["category"], "Rest");
    }
}
