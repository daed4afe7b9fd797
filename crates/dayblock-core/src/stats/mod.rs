//! Statistics over a planned day.
//!
//! Currently a single breakdown: scheduled minutes per category, in the
//! order categories first appear on the timeline.

mod allocation;

pub use allocation::{aggregate_by_category, CategoryTotal};
