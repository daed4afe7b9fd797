use clap::Args;
use dayblock_core::{TaskCategory, TaskPatch};

use super::render::render_day;
use super::{open_planner, SessionArgs};

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub session: SessionArgs,
    /// Print the day as JSON
    #[arg(long)]
    pub json: bool,
    /// Tasks as `title:minutes[:category]`; prefix with `~` for the backlog
    pub tasks: Vec<String>,
}

/// A task parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub title: String,
    pub duration: i32,
    pub category: Option<TaskCategory>,
    pub is_raw: bool,
}

impl TaskSpec {
    /// Parses `title:minutes[:category]`, with an optional leading `~`.
    ///
    /// The title may itself contain colons; minutes and category are taken
    /// from the end.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let (is_raw, body) = match spec.strip_prefix('~') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let mut parts: Vec<&str> = body.rsplitn(3, ':').collect();
        parts.reverse();

        let invalid = || format!("invalid task '{spec}': expected title:minutes[:category]");
        let minutes = |text: &str| text.trim().parse::<i32>().map_err(|_| invalid());

        let (title, duration, category) = match parts.as_slice() {
            [title, middle, last] => {
                if let Ok(category) = last.parse::<TaskCategory>() {
                    (title.to_string(), minutes(*middle)?, Some(category))
                } else if let Ok(duration) = last.trim().parse::<i32>() {
                    // `a:b:30` is a title with a colon and no category
                    (format!("{title}:{middle}"), duration, None)
                } else {
                    return Err(format!("{}: unknown category '{last}'", invalid()));
                }
            }
            [title, duration] => (title.to_string(), minutes(*duration)?, None),
            _ => return Err(invalid()),
        };

        Ok(Self {
            title: title.trim().to_string(),
            duration,
            category,
            is_raw,
        })
    }

    fn patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.clone()),
            duration: Some(self.duration),
            category: self.category,
            is_raw: None,
        }
    }
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let specs = args
        .tasks
        .iter()
        .map(|spec| TaskSpec::parse(spec))
        .collect::<Result<Vec<_>, _>>()?;

    let mut planner = open_planner(&args.session)?;
    for spec in &specs {
        let id = planner.add_task(spec.is_raw).id;
        planner.update_task(&id, &spec.patch())?;
    }

    let day = planner.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&day)?);
    } else {
        render_day(&mut std::io::stdout().lock(), &day)?;
    }
    Ok(())
}
