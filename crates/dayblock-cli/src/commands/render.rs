//! Plain-text rendering of a day snapshot.

use std::io::{self, Write};

use dayblock_core::DaySnapshot;

/// Characters of a task id shown to the user.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

fn title_or_placeholder(title: &str) -> &str {
    if title.trim().is_empty() {
        "(untitled)"
    } else {
        title
    }
}

/// Writes timeline, backlog and allocation sections.
pub fn render_day(out: &mut impl Write, day: &DaySnapshot) -> io::Result<()> {
    writeln!(
        out,
        "{}  (day starts {})",
        day.date.format("%a, %b %-d %Y"),
        day.day_start
    )?;

    writeln!(out, "\nTimeline")?;
    if day.scheduled.is_empty() {
        writeln!(out, "  (nothing scheduled)")?;
    }
    for (position, block) in day.scheduled.iter().enumerate() {
        let marker = if block.crosses_midnight() { " +1d" } else { "" };
        writeln!(
            out,
            "  {:>2}. {}-{}{marker}  {:<28} {:>4}m  {:<6}  [{}]",
            position + 1,
            block.start_time,
            block.end_time,
            title_or_placeholder(&block.title),
            block.duration,
            block.category,
            short_id(&block.id),
        )?;
    }

    writeln!(out, "\nBacklog")?;
    if day.backlog.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for task in &day.backlog {
        writeln!(
            out,
            "   -  {:<28} {:>4}m  {:<6}  [{}]",
            title_or_placeholder(&task.title),
            task.duration,
            task.category,
            short_id(&task.id),
        )?;
    }

    writeln!(out, "\nAllocation")?;
    for total in &day.allocation {
        writeln!(
            out,
            "  {:<6} {:>5}m  {:>3.0}%",
            total.category,
            total.total_minutes,
            total.share_of(day.total_minutes) * 100.0,
        )?;
    }
    match &day.ends_at {
        Some(end) => writeln!(out, "  total  {:>5}m  ends {end}", day.total_minutes)?,
        None => writeln!(out, "  total  {:>5}m", day.total_minutes)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dayblock_core::Planner;

    fn rendered(planner: &Planner) -> String {
        let mut out = Vec::new();
        render_day(&mut out, &planner.snapshot()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_sample_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let mut planner = Planner::new(date, "07:00").unwrap();
        planner.seed_sample_day();

        let text = rendered(&planner);
        assert!(text.starts_with("Fri, May 17 2024  (day starts 07:00)"));
        assert!(text.contains("07:45-10:45"));
        assert!(text.contains("Deep Work Session"));
        assert!(text.contains("(empty)"));
        assert!(text.contains("ends 12:15"));
    }

    #[test]
    fn marks_blocks_crossing_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let mut planner = Planner::new(date, "23:30").unwrap();
        planner.add_task(false);
        planner.add_task(false);

        let text = rendered(&planner);
        assert!(text.contains("23:30-00:00 +1d"));
        assert!(text.contains("00:00-00:30  (untitled)"));
    }

    #[test]
    fn short_id_tolerates_short_ids() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789"), "01234567");
    }
}
