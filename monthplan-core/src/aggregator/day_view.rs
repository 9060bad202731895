//! Day view: one date's activities and meetings in time order.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::calendar::MonthToken;
use crate::error::PlanResult;
use crate::identity::Viewer;
use crate::month_state::MonthState;
use crate::planner::Planner;
use crate::store::{Activity, Meeting};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub owner_id: String,
    pub date: NaiveDate,
    pub is_today: bool,
    pub month: MonthToken,
    pub state: MonthState,
    pub activities: Vec<Activity>,
    pub meetings: Vec<Meeting>,
}

impl Planner {
    pub fn day_view(
        &self,
        viewer: &Viewer,
        owner_id: &str,
        date: NaiveDate,
    ) -> PlanResult<DayView> {
        let month = MonthToken::of(date);
        self.ensure_can_view(viewer, owner_id, month)?;

        let mut items = self.items_between(owner_id, date, date)?;
        items.activities.sort_by_key(|a| a.at);
        items.meetings.sort_by_key(|m| m.at);

        debug!(owner_id, %date, "Built day view");

        Ok(DayView {
            owner_id: owner_id.to_string(),
            date,
            is_today: date == self.clock.today(),
            month,
            state: self.month_state(owner_id, month)?,
            activities: items.activities,
            meetings: items.meetings,
        })
    }
}
