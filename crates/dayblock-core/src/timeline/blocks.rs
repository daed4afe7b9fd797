//! Sequential block scheduler.
//!
//! Tasks are laid out back to back: each one starts where the previous one
//! ended. The running cursor is never reset at midnight, so contiguity holds
//! in minute space even when the displayed clock wraps.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use super::clock::{minutes_to_time, time_to_minutes};
use crate::error::TimeError;
use crate::task::Task;

/// A task annotated with its computed place on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,
    /// Display start, `HH:MM`
    pub start_time: String,
    /// Display end, `HH:MM`
    pub end_time: String,
    /// Cursor offset at start, in minutes from midnight of the planned day
    pub start_minute: i64,
    /// Cursor offset at end; may exceed one day
    pub end_minute: i64,
}

impl ScheduledTask {
    fn at(task: Task, start_minute: i64) -> Self {
        let end_minute = start_minute + i64::from(task.duration);
        Self {
            start_time: minutes_to_time(start_minute),
            end_time: minutes_to_time(end_minute),
            start_minute,
            end_minute,
            task,
        }
    }

    /// Returns whether the block ends on a later day than it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end_minute.div_euclid(super::MINUTES_PER_DAY)
            != self.start_minute.div_euclid(super::MINUTES_PER_DAY)
    }
}

impl Deref for ScheduledTask {
    type Target = Task;

    fn deref(&self) -> &Task {
        &self.task
    }
}

/// Lays tasks out back to back starting at the `HH:MM` time `start_from`.
///
/// # Errors
/// Returns [`TimeError::Malformed`] if `start_from` is not a clock time.
pub fn calculate_blocks<'a, I>(tasks: I, start_from: &str) -> Result<Vec<ScheduledTask>, TimeError>
where
    I: IntoIterator<Item = &'a Task>,
{
    let start_minute = time_to_minutes(start_from)?;
    Ok(calculate_blocks_from(tasks, start_minute))
}

/// Lays tasks out back to back starting at `start_minute`.
///
/// Negative durations are not rejected here; they move the cursor backward.
pub fn calculate_blocks_from<'a, I>(tasks: I, start_minute: i64) -> Vec<ScheduledTask>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut cursor = start_minute;
    tasks
        .into_iter()
        .map(|task| {
            let block = ScheduledTask::at(task.clone(), cursor);
            cursor = block.end_minute;
            block
        })
        .collect()
}
