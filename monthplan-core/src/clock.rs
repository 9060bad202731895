//! Wall-clock access and the canonical planning timezone.
//!
//! Month and day boundaries are computed in one configured timezone (UTC by
//! default) so that `past` / `current` classification does not depend on where
//! the process happens to run.

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::calendar::MonthToken;

/// Source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Noon UTC on the given day.
    pub fn on(date: NaiveDate) -> Self {
        FixedClock((date.and_time(NaiveTime::MIN) + TimeDelta::hours(12)).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A clock paired with the timezone that defines calendar days.
#[derive(Clone)]
pub struct PlanningClock {
    clock: Arc<dyn Clock>,
    tz: Tz,
}

impl PlanningClock {
    pub fn new(clock: Arc<dyn Clock>, tz: Tz) -> Self {
        PlanningClock { clock, tz }
    }

    pub fn system(tz: Tz) -> Self {
        Self::new(Arc::new(SystemClock), tz)
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now())
    }

    pub fn current_month(&self) -> MonthToken {
        MonthToken::of(self.today())
    }

    /// The calendar date an instant falls on in the planning timezone.
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    /// A UTC range that covers every instant whose local date lies within
    /// `first..=last`. Padded by a day on both ends, callers filter by
    /// [`PlanningClock::local_date`] afterwards.
    pub fn covering_range(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let from = first - Days::new(1);
        let to = last + Days::new(2);
        (
            from.and_time(NaiveTime::MIN).and_utc(),
            to.and_time(NaiveTime::MIN).and_utc(),
        )
    }
}

impl std::fmt::Debug for PlanningClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanningClock")
            .field("now", &self.now())
            .field("tz", &self.tz)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn month_boundary_depends_on_timezone() {
        // 23:30 UTC on Jan 31 is already Feb 1 in Tokyo.
        let instant = Utc.with_ymd_and_hms(2026, 1, 31, 23, 30, 0).unwrap();
        let utc = PlanningClock::new(Arc::new(FixedClock(instant)), Tz::UTC);
        let tokyo = PlanningClock::new(Arc::new(FixedClock(instant)), chrono_tz::Asia::Tokyo);

        assert_eq!(utc.current_month().to_string(), "2026-01");
        assert_eq!(tokyo.current_month().to_string(), "2026-02");
    }

    #[test]
    fn covering_range_spans_local_days() {
        let clock = PlanningClock::new(
            Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())),
            chrono_tz::America::Los_Angeles,
        );
        let first = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2026, 2, 7).unwrap();
        let (from, to) = clock.covering_range(first, last);

        let late_saturday = chrono_tz::America::Los_Angeles
            .with_ymd_and_hms(2026, 2, 7, 23, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert!(from <= late_saturday && late_saturday < to);
        assert_eq!(clock.local_date(late_saturday), last);
    }
}
