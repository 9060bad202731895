//! Month, week and day views.
//!
//! All three views share one step: fetch a user's activities and meetings for
//! a date span, then bucket them under the local calendar date of their
//! timestamp. Within a day, entries are ordered by timestamp.

mod day_view;
mod month_view;
mod week_view;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::calendar::{DayMeta, MonthToken};
use crate::error::PlanResult;
use crate::identity::Viewer;
use crate::planner::Planner;
use crate::store::{Activity, CalendarItems, Meeting, Timed};

pub use day_view::DayView;
pub use month_view::{GoalSummary, MonthView, WeekRow};
pub use week_view::{TaskProgress, WeekView, tasks_touched};

/// One rendered calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub is_today: bool,
    pub is_current_month: bool,
    pub activities: Vec<Activity>,
    pub meetings: Vec<Meeting>,
}

/// Group items by the date their timestamp falls on in `tz`, each day sorted
/// by timestamp. The sort is stable, so equal timestamps keep store order.
pub fn bucket_by_day<T: Timed>(items: Vec<T>, tz: Tz) -> BTreeMap<NaiveDate, Vec<T>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for item in items {
        let date = item.at().with_timezone(&tz).date_naive();
        buckets.entry(date).or_default().push(item);
    }
    for day in buckets.values_mut() {
        day.sort_by_key(|item| item.at());
    }
    buckets
}

/// Activities and meetings bucketed by day, handed out one cell at a time.
pub(crate) struct DayBuckets {
    activities: BTreeMap<NaiveDate, Vec<Activity>>,
    meetings: BTreeMap<NaiveDate, Vec<Meeting>>,
}

impl DayBuckets {
    pub(crate) fn new(items: CalendarItems, tz: Tz) -> Self {
        DayBuckets {
            activities: bucket_by_day(items.activities, tz),
            meetings: bucket_by_day(items.meetings, tz),
        }
    }

    pub(crate) fn cell(&mut self, meta: &DayMeta) -> DayCell {
        DayCell {
            date: meta.date,
            day_of_month: meta.day_of_month,
            is_today: meta.is_today,
            is_current_month: meta.is_current_month,
            activities: self.activities.remove(&meta.date).unwrap_or_default(),
            meetings: self.meetings.remove(&meta.date).unwrap_or_default(),
        }
    }
}

impl Planner {
    /// Items whose local date lies in `first..=last`.
    pub(crate) fn items_between(
        &self,
        user_id: &str,
        first: NaiveDate,
        last: NaiveDate,
    ) -> PlanResult<CalendarItems> {
        let (from, to) = self.clock.covering_range(first, last);
        let items = self.items.list_by_range(user_id, from, to)?;
        let in_span = |date: NaiveDate| first <= date && date <= last;

        Ok(CalendarItems {
            activities: items
                .activities
                .into_iter()
                .filter(|a| in_span(self.clock.local_date(a.at)))
                .collect(),
            meetings: items
                .meetings
                .into_iter()
                .filter(|m| in_span(self.clock.local_date(m.at)))
                .collect(),
        })
    }

    /// Months touched by `first..=last` that `viewer` may not see.
    fn hidden_months(
        &self,
        viewer: &Viewer,
        owner_id: &str,
        first: NaiveDate,
        last: NaiveDate,
    ) -> PlanResult<BTreeSet<MonthToken>> {
        let mut hidden = BTreeSet::new();
        let end = MonthToken::of(last);
        let mut month = MonthToken::of(first);

        while month <= end {
            if !self.can_view(viewer, owner_id, month)? {
                hidden.insert(month);
            }
            match month.next() {
                Some(next) => month = next,
                None => break,
            }
        }

        Ok(hidden)
    }

    /// [`Planner::items_between`] minus the days of months `viewer` may not
    /// see. A grid or week spills into neighbouring months, and each of them
    /// is gated on its own.
    pub(crate) fn visible_items_between(
        &self,
        viewer: &Viewer,
        owner_id: &str,
        first: NaiveDate,
        last: NaiveDate,
    ) -> PlanResult<CalendarItems> {
        let mut items = self.items_between(owner_id, first, last)?;
        let hidden = self.hidden_months(viewer, owner_id, first, last)?;

        if !hidden.is_empty() {
            let visible =
                |at: DateTime<Utc>| !hidden.contains(&MonthToken::of(self.clock.local_date(at)));
            items.activities.retain(|a| visible(a.at));
            items.meetings.retain(|m| visible(m.at));
        }

        Ok(items)
    }
}
