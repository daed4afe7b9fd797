//! In-memory, date-keyed task store.
//!
//! Each date owns an ordered sequence of tasks. Within a date, the relative
//! order of scheduled tasks (`is_raw == false`) is the timeline order; backlog
//! tasks are filtered out of it and keep their own stable order.
//!
//! The store is the serialization unit for anyone persisting a plan: it
//! serializes as a map from ISO `YYYY-MM-DD` to task lists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::task::{Task, TaskPatch};

/// Ordered task lists keyed by calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    days: BTreeMap<NaiveDate, Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks for `date` in storage order. Empty if the date was never touched.
    pub fn tasks(&self, date: NaiveDate) -> &[Task] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Scheduled tasks for `date` in timeline order.
    pub fn scheduled(&self, date: NaiveDate) -> impl Iterator<Item = &Task> + '_ {
        self.tasks(date).iter().filter(|t| t.is_scheduled())
    }

    /// Backlog tasks for `date` in their stable order.
    pub fn backlog(&self, date: NaiveDate) -> impl Iterator<Item = &Task> + '_ {
        self.tasks(date).iter().filter(|t| t.is_raw)
    }

    pub fn get(&self, date: NaiveDate, id: &str) -> Option<&Task> {
        self.tasks(date).iter().find(|t| t.id == id)
    }

    /// Dates that have a task list, oldest first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    fn day_mut(&mut self, date: NaiveDate) -> &mut Vec<Task> {
        self.days.entry(date).or_default()
    }

    /// Appends `task` after every existing task of `date`.
    pub fn add_task(&mut self, date: NaiveDate, task: Task) -> &Task {
        let day = self.day_mut(date);
        day.push(task);
        &day[day.len() - 1]
    }

    /// Merges `patch` into the task with `id`, leaving order untouched.
    ///
    /// # Errors
    /// - [`StoreError::InvalidDuration`] if the patch carries a negative duration.
    /// - [`StoreError::NotFound`] if no task on `date` has this id.
    pub fn update_task(
        &mut self,
        date: NaiveDate,
        id: &str,
        patch: &TaskPatch,
    ) -> Result<&Task, StoreError> {
        if let Some(duration) = patch.duration.filter(|d| *d < 0) {
            return Err(StoreError::InvalidDuration { duration });
        }

        let task = self
            .day_mut(date)
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        task.apply(patch);
        Ok(task)
    }

    /// Removes the task with `id` and returns it. Remaining order is kept.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no task on `date` has this id.
    pub fn delete_task(&mut self, date: NaiveDate, id: &str) -> Result<Task, StoreError> {
        let day = self.day_mut(date);
        let index = day
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        Ok(day.remove(index))
    }

    /// Moves the scheduled task at `from` to position `to` of the scheduled subset.
    ///
    /// The task is removed first and then inserted at `to`, both indices being
    /// positions within the scheduled subset. The date's sequence is rebuilt as
    /// the reordered scheduled tasks followed by the backlog in its old order.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidIndex`] if either index is not a position of
    /// the scheduled subset. Nothing changes in that case.
    pub fn reorder_scheduled(
        &mut self,
        date: NaiveDate,
        from: usize,
        to: usize,
    ) -> Result<(), StoreError> {
        let len = self.scheduled(date).count();
        for index in [from, to] {
            if index >= len {
                return Err(StoreError::InvalidIndex { index, len });
            }
        }

        let day = self.day_mut(date);
        let (mut scheduled, backlog): (Vec<Task>, Vec<Task>) =
            std::mem::take(day).into_iter().partition(Task::is_scheduled);

        let moved = scheduled.remove(from);
        scheduled.insert(to, moved);

        scheduled.extend(backlog);
        *day = scheduled;
        Ok(())
    }
}
