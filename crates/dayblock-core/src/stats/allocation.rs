//! Per-category time allocation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::task::TaskCategory;
use crate::timeline::ScheduledTask;

/// Total scheduled minutes for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: TaskCategory,
    pub total_minutes: i64,
    /// Chart color for the category
    pub color: String,
}

impl CategoryTotal {
    /// Share of `day_total` taken by this category, in `0.0..=1.0` for
    /// non-negative inputs. Zero when the day is empty.
    pub fn share_of(&self, day_total: i64) -> f64 {
        if day_total == 0 {
            return 0.0;
        }
        self.total_minutes as f64 / day_total as f64
    }
}

/// Sums durations per category.
///
/// One entry is emitted for every category that has at least one task, in
/// the order the category is first met while iterating `tasks`. Categories
/// without tasks are omitted rather than reported as zero.
pub fn aggregate_by_category<'a, I>(blocks: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a ScheduledTask>,
{
    let mut totals: IndexMap<TaskCategory, i64> = IndexMap::new();
    for task in blocks {
        *totals.entry(task.category).or_insert(0) += i64::from(task.duration);
    }

    totals
        .into_iter()
        .map(|(category, total_minutes)| CategoryTotal {
            category,
            total_minutes,
            color: category.chart_color().to_string(),
        })
        .collect()
}
