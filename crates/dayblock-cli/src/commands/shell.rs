//! Line-oriented planning session.
//!
//! Reads one command per line, applies it to the planner and re-renders the
//! day after every change. Tasks are addressed by an id prefix as shown in
//! brackets, or by timeline position as `#N`.

use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::Args;
use dayblock_core::{Planner, TaskCategory, TaskPatch};
use tracing::debug;

use super::render::{render_day, short_id};
use super::{open_planner, SessionArgs};

#[derive(Args, Debug)]
pub struct ShellArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

const HELP: &str = "\
commands:
  add [title]              add a block at the end of the timeline
  backlog [title]          add a task to the backlog
  title <task> <text>      rename a task
  duration <task> <min>    change a task's length
  category <task> <name>   study, work, social, rest, gaming or other
  schedule <task>          move a backlog task onto the timeline
  unschedule <task>        move a timeline task to the backlog
  delete <task>            remove a task
  move <from> <to>         move a timeline block, positions start at 1
  date <YYYY-MM-DD>        switch day
  next [days] | prev [days]
  start <HH:MM>            change when the day starts
  show | json | help | quit
tasks are an id prefix such as 3fa2 or a timeline position such as #2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    planner: Planner,
}

type CommandResult = Result<Flow, Box<dyn Error>>;

impl Session {
    pub fn new(planner: Planner) -> Self {
        Self { planner }
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Runs commands from `input` until it ends or `quit` is read.
    ///
    /// Command errors are reported on `out` and the session continues.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match self.execute(&line, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => writeln!(out, "error: {err}")?,
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Applies one command line.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> CommandResult {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = words.collect();
        debug!(command, ?args, "shell command");

        match (command, args.as_slice()) {
            ("add", title) => self.add(false, title, out),
            ("backlog", title) => self.add(true, title, out),
            ("title", [task, text @ ..]) => {
                let patch = TaskPatch::title(text.join(" "));
                self.update(task, &patch, out)
            }
            ("duration", [task, minutes]) => {
                let minutes: i32 = minutes
                    .parse()
                    .map_err(|_| format!("'{minutes}' is not a number of minutes"))?;
                self.update(task, &TaskPatch::duration(minutes), out)
            }
            ("category", [task, name]) => {
                let category: TaskCategory = name.parse()?;
                self.update(task, &TaskPatch::category(category), out)
            }
            ("schedule", [task]) => {
                let id = self.resolve(task)?;
                self.planner.schedule_backlog_task(&id)?;
                self.show(out)
            }
            ("unschedule", [task]) => self.update(task, &TaskPatch::is_raw(true), out),
            ("delete", [task]) => {
                let id = self.resolve(task)?;
                let removed = self.planner.delete_task(&id)?;
                writeln!(out, "deleted [{}]", short_id(&removed.id))?;
                self.show(out)
            }
            ("move", [from, to]) => {
                let from = position(from)?;
                let to = position(to)?;
                self.planner.reorder_scheduled(from, to)?;
                self.show(out)
            }
            ("date", [date]) => {
                self.planner.set_selected_date(date)?;
                self.show(out)
            }
            ("next", days) => self.navigate(days, 1, out),
            ("prev", days) => self.navigate(days, -1, out),
            ("start", [time]) => {
                self.planner.set_day_start(time)?;
                self.show(out)
            }
            ("show", []) => self.show(out),
            ("json", []) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&self.planner.snapshot())?)?;
                Ok(Flow::Continue)
            }
            ("help", _) => {
                writeln!(out, "{HELP}")?;
                Ok(Flow::Continue)
            }
            ("quit" | "exit", []) => Ok(Flow::Quit),
            _ => Err(format!("cannot parse '{}', type help for commands", line.trim()).into()),
        }
    }

    pub fn show(&self, out: &mut impl Write) -> CommandResult {
        render_day(out, &self.planner.snapshot())?;
        Ok(Flow::Continue)
    }

    fn add(&mut self, is_raw: bool, title: &[&str], out: &mut impl Write) -> CommandResult {
        let id = self.planner.add_task(is_raw).id;
        if !title.is_empty() {
            self.planner.update_task(&id, &TaskPatch::title(title.join(" ")))?;
        }
        writeln!(out, "added [{}]", short_id(&id))?;
        self.show(out)
    }

    fn update(&mut self, task: &str, patch: &TaskPatch, out: &mut impl Write) -> CommandResult {
        let id = self.resolve(task)?;
        self.planner.update_task(&id, patch)?;
        self.show(out)
    }

    fn navigate(&mut self, days: &[&str], direction: i64, out: &mut impl Write) -> CommandResult {
        let days: i64 = match days {
            [] => 1,
            [n] => n.parse().map_err(|_| format!("'{n}' is not a number of days"))?,
            _ => return Err("expected at most one number of days".into()),
        };
        let days = days
            .checked_mul(direction)
            .ok_or("day offset out of range")?;
        self.planner.navigate_date(days)?;
        self.show(out)
    }

    /// Turns `#N` or an id prefix into a full task id on the selected date.
    fn resolve(&self, reference: &str) -> Result<String, Box<dyn Error>> {
        if let Some(n) = reference.strip_prefix('#') {
            let index = position(n)?;
            return self
                .planner
                .scheduled()
                .get(index)
                .map(|block| block.task.id.clone())
                .ok_or_else(|| format!("no timeline block at {reference}").into());
        }

        let matches: Vec<&str> = self
            .planner
            .tasks()
            .iter()
            .map(|t| t.id.as_str())
            .filter(|id| id.starts_with(reference))
            .collect();
        match matches.as_slice() {
            [id] => Ok(id.to_string()),
            [] => Err(format!("no task matches '{reference}'").into()),
            _ => Err(format!("'{reference}' matches {} tasks", matches.len()).into()),
        }
    }
}

/// Converts a 1-based position typed by the user to an index.
fn position(text: &str) -> Result<usize, String> {
    text.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| format!("'{text}' is not a position (1, 2, ...)"))
}

pub fn run(args: ShellArgs) -> Result<(), Box<dyn Error>> {
    let planner = open_planner(&args.session)?;
    let mut session = Session::new(planner);

    let mut out = io::stdout().lock();
    session.show(&mut out)?;
    writeln!(out, "type help for commands")?;
    session.run(io::stdin().lock(), &mut out)?;
    Ok(())
}
