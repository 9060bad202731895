//! Week view: seven days plus the tasks the week's activities worked on.

use serde::Serialize;
use tracing::debug;

use crate::aggregator::{DayBuckets, DayCell};
use crate::calendar::{DayMeta, MonthToken, WeekToken};
use crate::error::PlanResult;
use crate::identity::Viewer;
use crate::month_state::MonthState;
use crate::planner::Planner;
use crate::store::Activity;

/// A task touched during the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskProgress {
    pub id: String,
    pub title: String,
    /// The task's overall progress percentage.
    pub progress: u8,
    /// This week's activities on the task that are complete.
    pub completed_activities: usize,
    /// All of this week's activities on the task.
    pub total_activities: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView {
    pub owner_id: String,
    pub week: WeekToken,
    /// The month holding the week's Thursday.
    pub month: MonthToken,
    pub state: MonthState,
    pub days: Vec<DayCell>,
    pub tasks: Vec<TaskProgress>,
}

/// Distinct tasks linked from `activities`, in order of first appearance.
pub fn tasks_touched(activities: &[Activity]) -> Vec<TaskProgress> {
    let mut tasks: Vec<TaskProgress> = Vec::new();

    for activity in activities {
        let Some(link) = &activity.task else {
            continue;
        };

        let index = match tasks.iter().position(|t| t.id == link.id) {
            Some(index) => index,
            None => {
                tasks.push(TaskProgress {
                    id: link.id.clone(),
                    title: link.title.clone(),
                    progress: link.progress.min(100),
                    completed_activities: 0,
                    total_activities: 0,
                });
                tasks.len() - 1
            }
        };

        let task = &mut tasks[index];
        task.total_activities += 1;
        if activity.completed {
            task.completed_activities += 1;
        }
    }

    tasks
}

impl Planner {
    pub fn week_view(
        &self,
        viewer: &Viewer,
        owner_id: &str,
        week: WeekToken,
    ) -> PlanResult<WeekView> {
        let month = week.month();
        self.ensure_can_view(viewer, owner_id, month)?;

        let today = self.clock.today();
        let mut items =
            self.visible_items_between(viewer, owner_id, week.monday(), week.sunday())?;
        items.activities.sort_by_key(|a| a.at);
        let tasks = tasks_touched(&items.activities);

        let mut buckets = DayBuckets::new(items, self.clock.timezone());
        let days = week
            .days()
            .iter()
            .map(|date| buckets.cell(&DayMeta::new(*date, month, today)))
            .collect();

        debug!(owner_id, %week, "Built week view");

        Ok(WeekView {
            owner_id: owner_id.to_string(),
            week,
            month,
            state: self.month_state(owner_id, month)?,
            days,
            tasks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::tests::{activity, at};
    use crate::identity::Role;
    use crate::planner::testing::{fixture, goal, month};
    use crate::store::{GoalStatus, TaskLink};

    fn linked(
        id: &str,
        hour: u32,
        day: u32,
        task: &str,
        progress: u8,
        completed: bool,
    ) -> Activity {
        let mut a = activity(id, at(2026, 2, day, hour, 0));
        a.completed = completed;
        a.task = Some(TaskLink {
            id: task.to_string(),
            title: format!("Task {task}"),
            progress,
        });
        a
    }

    #[test]
    fn counts_only_this_weeks_activities() {
        let fx = fixture("2026-02-10");
        // 2026-W07 runs Mon 2026-02-09 .. Sun 2026-02-15.
        fx.store.add_activity("ana", linked("a1", 9, 9, "t1", 40, true)).unwrap();
        fx.store.add_activity("ana", linked("a2", 9, 11, "t1", 40, false)).unwrap();
        fx.store.add_activity("ana", linked("a3", 9, 12, "t2", 75, true)).unwrap();
        // Previous week, same task.
        fx.store.add_activity("ana", linked("a0", 9, 6, "t1", 40, true)).unwrap();
        fx.store.add_activity("ana", activity("free", at(2026, 2, 13, 10, 0))).unwrap();

        let week: WeekToken = "2026-W07".parse().unwrap();
        let view = fx.planner.week_view(&Viewer::member("ana"), "ana", week).unwrap();

        assert_eq!(view.days.len(), 7);
        assert_eq!(view.month.to_string(), "2026-02");
        assert_eq!(view.state, MonthState::Current);
        assert!(view.days[1].is_today);

        assert_eq!(view.tasks.len(), 2);
        let t1 = &view.tasks[0];
        assert_eq!(t1.id, "t1");
        assert_eq!(t1.progress, 40);
        assert_eq!(t1.completed_activities, 1);
        assert_eq!(t1.total_activities, 2);
        assert_eq!(view.tasks[1].id, "t2");
        assert_eq!(view.tasks[1].completed_activities, 1);

        let total: usize = view.days.iter().map(|d| d.activities.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn straddling_week_uses_thursday_month() {
        let fx = fixture("2026-02-10");
        // Mon 2026-03-30 .. Sun 2026-04-05.
        let week: WeekToken = "2026-W14".parse().unwrap();
        let view = fx.planner.week_view(&Viewer::member("ana"), "ana", week).unwrap();
        assert_eq!(view.month.to_string(), "2026-04");
        assert_eq!(view.state, MonthState::FutureLocked);
        assert!(!view.days[0].is_current_month);
        assert!(view.days[6].is_current_month);
    }

    #[test]
    fn tasks_touched_ignores_unlinked() {
        let activities = vec![activity("a", at(2026, 2, 9, 9, 0))];
        assert!(tasks_touched(&activities).is_empty());
    }

    #[test]
    fn supervisor_sees_only_confirmed_months_of_straddling_week() {
        let fx = fixture("2026-02-10");
        let sam = Viewer::new("sam", Role::Supervisor, "sales");
        fx.store.link_supervisor("sam", "ana", "sales").unwrap();
        fx.store
            .set_goals("ana", month("2026-02"), vec![goal("g1", GoalStatus::Confirmed)])
            .unwrap();
        fx.planner.confirm("ana", month("2026-02")).unwrap();

        // 2026-W09 runs Mon 2026-02-23 .. Sun 2026-03-01; 2026-03 is unconfirmed.
        let mut feb = activity("feb-call", at(2026, 2, 25, 9, 0));
        feb.task = Some(TaskLink {
            id: "t1".into(),
            title: "Task t1".into(),
            progress: 10,
        });
        let mut march = activity("march-secret", at(2026, 3, 1, 10, 0));
        march.task = Some(TaskLink {
            id: "t2".into(),
            title: "Task t2".into(),
            progress: 90,
        });
        fx.store.add_activity("ana", feb).unwrap();
        fx.store.add_activity("ana", march).unwrap();

        let week: WeekToken = "2026-W09".parse().unwrap();
        let view = fx.planner.week_view(&sam, "ana", week).unwrap();
        assert_eq!(view.days.len(), 7);
        assert_eq!(view.days[2].activities.len(), 1);
        assert_eq!(view.days[6].date.to_string(), "2026-03-01");
        assert!(view.days[6].activities.is_empty());
        let task_ids: Vec<_> = view.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(task_ids, ["t1"]);

        let own = fx.planner.week_view(&Viewer::member("ana"), "ana", week).unwrap();
        assert_eq!(own.days[6].activities.len(), 1);
        assert_eq!(own.tasks.len(), 2);
    }
}
