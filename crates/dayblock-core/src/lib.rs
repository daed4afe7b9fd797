//! # Dayblock Core Library
//!
//! This library provides the core logic for Dayblock, a single-user day
//! planner. Tasks with a duration and category are laid out back to back on a
//! timeline from a configurable day start, and the scheduled minutes are
//! broken down per category. The CLI is a thin shell over the same library.
//!
//! ## Architecture
//!
//! - **Timeline**: Clock arithmetic and the sequential block scheduler
//! - **Storage**: In-memory date-keyed task store and TOML-based configuration
//! - **Stats**: Per-category time allocation
//! - **Planner**: State holder that applies mutations and recomputes views
//!
//! ## Key Components
//!
//! - [`Planner`]: Selected date, day start and task store behind one API
//! - [`calculate_blocks`]: Start/end times for an ordered task list
//! - [`TaskStore`]: Ordered tasks per date with scheduled/backlog split
//! - [`Config`]: Application configuration management

pub mod error;
pub mod planner;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timeline;

pub use error::{ConfigError, CoreError, PlannerError, StoreError, TimeError};
pub use planner::{DaySnapshot, Planner, DEFAULT_DAY_START_MINUTE};
pub use stats::{aggregate_by_category, CategoryTotal};
pub use storage::{Config, PlannerConfig, ProfileConfig, TaskStore};
pub use task::{Task, TaskCategory, TaskPatch, DEFAULT_DURATION_MINUTES};
pub use timeline::{
    calculate_blocks, calculate_blocks_from, minutes_to_time, time_to_minutes, ScheduledTask,
    MINUTES_PER_DAY,
};
