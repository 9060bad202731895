//! Month view: a padded calendar grid plus the month's goals.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::aggregator::{DayBuckets, DayCell};
use crate::calendar::{MonthToken, WeekToken, weeks_in_month};
use crate::error::PlanResult;
use crate::identity::Viewer;
use crate::month_state::MonthState;
use crate::planner::Planner;
use crate::store::{Goal, GoalStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSummary {
    pub id: String,
    pub title: String,
    pub status: GoalStatus,
    /// Completed tasks over all tasks, 0.0 when the goal has none.
    pub completion_ratio: f64,
}

impl From<&Goal> for GoalSummary {
    fn from(goal: &Goal) -> Self {
        let completion_ratio = if goal.task_count == 0 {
            0.0
        } else {
            f64::from(goal.completed_task_count.min(goal.task_count)) / f64::from(goal.task_count)
        };

        GoalSummary {
            id: goal.id.clone(),
            title: goal.title.clone(),
            status: goal.status,
            completion_ratio,
        }
    }
}

/// One grid row: always seven cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekRow {
    pub week: WeekToken,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView {
    pub owner_id: String,
    pub month: MonthToken,
    pub state: MonthState,
    pub today: NaiveDate,
    pub weeks: Vec<WeekRow>,
    pub goals: Vec<GoalSummary>,
}

impl MonthView {
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|row| row.days.iter())
    }
}

impl Planner {
    pub fn month_view(
        &self,
        viewer: &Viewer,
        owner_id: &str,
        month: MonthToken,
    ) -> PlanResult<MonthView> {
        self.ensure_can_view(viewer, owner_id, month)?;

        let today = self.clock.today();
        let grid = weeks_in_month(month, today);

        let (first, last) = match (grid.first(), grid.last()) {
            (Some(first), Some(last)) => (first.week.monday(), last.week.sunday()),
            _ => (month.first_day(), month.last_day()),
        };
        let items = self.visible_items_between(viewer, owner_id, first, last)?;
        let mut buckets = DayBuckets::new(items, self.clock.timezone());

        let weeks = grid
            .iter()
            .map(|row| WeekRow {
                week: row.week,
                days: row.days.iter().map(|meta| buckets.cell(meta)).collect(),
            })
            .collect();

        let goals = self
            .goals
            .list_goals(owner_id, month)?
            .iter()
            .map(GoalSummary::from)
            .collect();

        debug!(owner_id, %month, "Built month view");

        Ok(MonthView {
            owner_id: owner_id.to_string(),
            month,
            state: self.month_state(owner_id, month)?,
            today,
            weeks,
            goals,
        })
    }
}
