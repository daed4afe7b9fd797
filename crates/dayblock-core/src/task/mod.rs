//! Task record and category types.
//!
//! A [`Task`] carries only authoritative fields. Start and end times are
//! derived by the block scheduler and live on [`crate::timeline::ScheduledTask`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Duration given to freshly added tasks, in minutes.
pub const DEFAULT_DURATION_MINUTES: i32 = 30;

/// Category used to group time on the allocation breakdown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TaskCategory {
    Study,
    Work,
    Social,
    Rest,
    Gaming,
    #[default]
    Other,
}

impl TaskCategory {
    /// Every category, in declaration order.
    pub const ALL: [TaskCategory; 6] = [
        TaskCategory::Study,
        TaskCategory::Work,
        TaskCategory::Social,
        TaskCategory::Rest,
        TaskCategory::Gaming,
        TaskCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Work => "Work",
            Self::Social => "Social",
            Self::Rest => "Rest",
            Self::Gaming => "Gaming",
            Self::Other => "Other",
        }
    }

    /// Hex color used for this category in allocation charts.
    pub fn chart_color(&self) -> &'static str {
        match self {
            Self::Study => "#6366f1",
            Self::Work => "#10b981",
            Self::Social => "#f59e0b",
            Self::Rest => "#f43f5e",
            Self::Gaming => "#8b5cf6",
            Self::Other => "#64748b",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected one of: study, work, social, rest, gaming, other)",
            self.0
        )
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for TaskCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        TaskCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// A single planned item for one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Free text, may be empty
    pub title: String,
    /// Length in minutes
    pub duration: i32,
    pub category: TaskCategory,
    /// True while the task sits in the backlog instead of on the timeline
    pub is_raw: bool,
}

impl Task {
    /// Creates a blank task with a fresh id, default duration and `Other` category.
    pub fn new(is_raw: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            duration: DEFAULT_DURATION_MINUTES,
            category: TaskCategory::Other,
            is_raw,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    /// Returns whether this task is laid out on the timeline.
    pub fn is_scheduled(&self) -> bool {
        !self.is_raw
    }

    /// Merges every field present in `patch` into this task.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(is_raw) = patch.is_raw {
            self.is_raw = is_raw;
        }
    }
}

/// Partial update for a [`Task`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_raw: Option<bool>,
}

impl TaskPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn duration(duration: i32) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn category(category: TaskCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn is_raw(is_raw: bool) -> Self {
        Self {
            is_raw: Some(is_raw),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_has_defaults() {
        let task = Task::new(true);
        assert!(task.title.is_empty());
        assert_eq!(task.duration, 30);
        assert_eq!(task.category, TaskCategory::Other);
        assert!(task.is_raw);
        assert!(!task.is_scheduled());
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn new_tasks_get_distinct_ids() {
        assert_ne!(Task::new(false).id, Task::new(false).id);
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut task = Task::new(false).with_title("Read").with_duration(45);
        task.apply(&TaskPatch {
            category: Some(TaskCategory::Study),
            ..TaskPatch::default()
        });

        assert_eq!(task.title, "Read");
        assert_eq!(task.duration, 45);
        assert_eq!(task.category, TaskCategory::Study);
        assert!(!task.is_raw);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("work".parse::<TaskCategory>(), Ok(TaskCategory::Work));
        assert_eq!(" GAMING ".parse::<TaskCategory>(), Ok(TaskCategory::Gaming));
        assert!("chores".parse::<TaskCategory>().is_err());
    }

    #[test]
    fn category_serializes_as_display_name() {
        let json = serde_json::to_string(&TaskCategory::Social).unwrap();
        assert_eq!(json, "\"Social\"");
        assert_eq!(TaskCategory::Social.to_string(), "Social");
    }

    #[test]
    fn every_category_has_a_chart_color() {
        for category in TaskCategory::ALL {
            let color = category.chart_color();
            assert!(color.starts_with('#') && color.len() == 7, "{category}: {color}");
        }
    }

    #[test]
    fn task_serialization() {
        let task = Task::new(false)
            .with_title("Team Sync")
            .with_category(TaskCategory::Social);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["is_raw"], false);
        assert_eq!(json["category"], "Social");

        let decoded: Task = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::duration(0).is_empty());
    }
}
