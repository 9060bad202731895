//! Terminal rendering for planning types.
//!
//! Extension traits and helpers that add colored output to monthplan-core
//! types using owo_colors.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use monthplan_core::store::{Activity, GoalStatus, Meeting};
use monthplan_core::{
    DayCell, DayView, GoalSummary, MonthState, MonthView, OpenedMonth, PlanningStatus, TaskProgress,
    WeekView,
};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for MonthState {
    fn render(&self) -> String {
        match self {
            MonthState::Past => self.as_str().dimmed().to_string(),
            MonthState::Current => self.as_str().green().to_string(),
            MonthState::FutureOpen => self.as_str().cyan().to_string(),
            MonthState::FutureLocked => self.as_str().yellow().to_string(),
        }
    }
}

impl Render for GoalStatus {
    fn render(&self) -> String {
        match self {
            GoalStatus::Draft => "draft".yellow().to_string(),
            GoalStatus::Confirmed => "confirmed".blue().to_string(),
            GoalStatus::InProgress => "in progress".cyan().to_string(),
            GoalStatus::Completed => "completed".green().to_string(),
            GoalStatus::Cancelled => "cancelled".dimmed().to_string(),
        }
    }
}

impl Render for PlanningStatus {
    fn render(&self) -> String {
        let mut lines = vec![format!("📅 {}", self.month.bold())];

        let goals = format!("{}/{} goals confirmed", self.confirmed_goals, self.total_goals);
        if self.total_goals > 0 && self.confirmed_goals == self.total_goals {
            lines.push(format!("   {}", goals.green()));
        } else {
            lines.push(format!("   {}", goals.yellow()));
        }

        match self.confirmed_at {
            Some(at) => lines.push(format!(
                "   {} {}",
                "✓ planning confirmed".green(),
                at.format("%Y-%m-%d %H:%M UTC").dimmed()
            )),
            None if self.can_confirm => lines.push(format!("   {}", "ready to confirm".cyan())),
            None => lines.push(format!("   {}", "not confirmed".dimmed())),
        }

        if let Some(score) = self.ai_score {
            lines.push(format!("   AI score {}", format!("{score:.1}").bold()));
        }

        lines.join("\n")
    }
}

impl Render for OpenedMonth {
    fn render(&self) -> String {
        if self.created {
            format!("{} {} opened for planning", "✓".green(), self.month.bold())
        } else {
            format!("{} is already open", self.month.bold())
        }
    }
}

impl Render for GoalSummary {
    fn render(&self) -> String {
        let percent = format!("{:>3.0}%", self.completion_ratio * 100.0);
        format!("{} {} ({})", percent.dimmed(), self.title, self.status.render())
    }
}

impl Render for TaskProgress {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            format!("{:>3}%", self.progress).dimmed(),
            self.title,
            format!(
                "({}/{} activities done this week)",
                self.completed_activities, self.total_activities
            )
            .dimmed()
        )
    }
}

/// One grid cell: day number plus a marker when the day has entries.
fn render_cell(cell: &DayCell) -> String {
    let marker = if cell.activities.is_empty() && cell.meetings.is_empty() {
        ' '
    } else {
        '•'
    };
    let text = format!("{:>3}{}", cell.day_of_month, marker);

    if cell.is_today {
        text.reversed().to_string()
    } else if !cell.is_current_month {
        text.dimmed().to_string()
    } else {
        text
    }
}

impl Render for MonthView {
    fn render(&self) -> String {
        let mut lines = vec![
            format!(
                "{}  {}",
                self.month.first_day().format("%B %Y").bold(),
                self.state.render()
            ),
            " Mo  Tu  We  Th  Fr  Sa  Su".dimmed().to_string(),
        ];

        for row in &self.weeks {
            let cells: Vec<String> = row.days.iter().map(render_cell).collect();
            lines.push(format!("{}  {}", cells.join(""), row.week.dimmed()));
        }

        lines.push(String::new());
        if self.goals.is_empty() {
            lines.push("No goals yet".dimmed().to_string());
        } else {
            lines.push("Goals".bold().to_string());
            lines.extend(self.goals.iter().map(|g| format!("   {}", g.render())));
        }

        lines.join("\n")
    }
}

fn render_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%H:%M").to_string()
}

fn render_activity(activity: &Activity, tz: Tz) -> String {
    let check = if activity.completed {
        "✓".green().to_string()
    } else {
        "·".dimmed().to_string()
    };
    let task = match &activity.task {
        Some(task) => format!(" [{}]", task.title).dimmed().to_string(),
        None => String::new(),
    };
    format!("{} {} {}{}", render_time(activity.at, tz).dimmed(), check, activity.title, task)
}

fn render_meeting(meeting: &Meeting, tz: Tz) -> String {
    let time = match meeting.ends_at {
        Some(end) => format!("{}-{}", render_time(meeting.at, tz), render_time(end, tz)),
        None => render_time(meeting.at, tz),
    };
    format!("{} {} {}", time.dimmed(), "◆".blue(), meeting.title)
}

fn render_entries(activities: &[Activity], meetings: &[Meeting], tz: Tz, lines: &mut Vec<String>) {
    lines.extend(meetings.iter().map(|m| format!("   {}", render_meeting(m, tz))));
    lines.extend(activities.iter().map(|a| format!("   {}", render_activity(a, tz))));
}

/// A week as a day-by-day agenda, times shown in `tz`.
pub fn week_view(view: &WeekView, tz: Tz) -> String {
    let mut lines = vec![format!("{}  {}", view.week.bold(), view.state.render())];

    for cell in &view.days {
        let heading = cell.date.format("%a %d %b").to_string();
        if cell.is_today {
            lines.push(heading.bold().to_string());
        } else {
            lines.push(heading);
        }
        render_entries(&cell.activities, &cell.meetings, tz, &mut lines);
    }

    if !view.tasks.is_empty() {
        lines.push(String::new());
        lines.push("Tasks".bold().to_string());
        lines.extend(view.tasks.iter().map(|t| format!("   {}", t.render())));
    }

    lines.join("\n")
}

/// A single day's agenda, times shown in `tz`.
pub fn day_view(view: &DayView, tz: Tz) -> String {
    let mut lines = vec![format!(
        "{}  {}",
        view.date.format("%A %d %B %Y").bold(),
        view.state.render()
    )];

    if view.activities.is_empty() && view.meetings.is_empty() {
        lines.push(format!("   {}", "Nothing scheduled".dimmed()));
    } else {
        render_entries(&view.activities, &view.meetings, tz, &mut lines);
    }

    lines.join("\n")
}
