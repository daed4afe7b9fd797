//! Timeline layout for a planned day.
//!
//! This module provides:
//! - Clock arithmetic between `HH:MM` strings and minute offsets
//! - The block scheduler that lays tasks out back to back from a start time

mod blocks;
mod clock;

pub use blocks::{calculate_blocks, calculate_blocks_from, ScheduledTask};
pub use clock::{minutes_to_time, time_to_minutes, MINUTES_PER_DAY};
