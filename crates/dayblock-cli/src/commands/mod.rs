pub mod config;
pub mod plan;
pub mod render;
pub mod shell;

use chrono::Local;
use clap::Args;
use dayblock_core::{Config, Planner};

/// Options shared by every command that opens a planning session.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Date to plan, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Day start time, HH:MM (default: from config)
    #[arg(long)]
    pub start: Option<String>,
    /// Seed the day with the sample plan
    #[arg(long)]
    pub sample: bool,
}

/// Builds a planner from config, then applies command-line overrides.
pub fn open_planner(args: &SessionArgs) -> Result<Planner, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let date = match &args.date {
        Some(date) => Planner::parse_date(date)?,
        None => Local::now().date_naive(),
    };

    let mut planner = Planner::from_config(&config, date)?;
    if let Some(start) = &args.start {
        planner.set_day_start(start)?;
    }
    if args.sample && !config.planner.seed_sample_day {
        planner.seed_sample_day();
    }
    Ok(planner)
}
