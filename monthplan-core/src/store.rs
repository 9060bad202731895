//! Storage seams.
//!
//! Goals, calendar items and supervisory relationships live in external
//! systems; this crate only reads them. The [`MonthLedger`] is the one store the
//! governance layer writes to.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::MonthToken;
use crate::error::PlanResult;
use crate::plan_state::MonthRecord;

/// Lifecycle of a planning goal. `Draft` is the initial status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Draft,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl GoalStatus {
    pub fn is_initial(&self) -> bool {
        matches!(self, GoalStatus::Draft)
    }
}

/// A monthly goal ("big rock") owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub status: GoalStatus,
    #[serde(default)]
    pub task_count: u32,
    #[serde(default)]
    pub completed_task_count: u32,
}

/// The mid-level task an activity or meeting contributes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLink {
    pub id: String,
    pub title: String,
    /// Percentage, 0 to 100, as tracked by the task store.
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskLink>,
}

/// Anything placed on the calendar by its timestamp.
pub trait Timed {
    fn at(&self) -> DateTime<Utc>;
}

impl Timed for Activity {
    fn at(&self) -> DateTime<Utc> {
        self.at
    }
}

impl Timed for Meeting {
    fn at(&self) -> DateTime<Utc> {
        self.at
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarItems {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
}

impl CalendarItems {
    /// Copy of the items with `from <= at < to`.
    pub fn within(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> CalendarItems {
        let in_range = |at: DateTime<Utc>| from <= at && at < to;
        CalendarItems {
            activities: self
                .activities
                .iter()
                .filter(|a| in_range(a.at))
                .cloned()
                .collect(),
            meetings: self
                .meetings
                .iter()
                .filter(|m| in_range(m.at))
                .cloned()
                .collect(),
        }
    }
}

pub trait GoalStore: Send + Sync {
    fn list_goals(&self, user_id: &str, month: MonthToken) -> PlanResult<Vec<Goal>>;
}

pub trait ActivityStore: Send + Sync {
    /// Items with `from <= at < to`.
    fn list_by_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> PlanResult<CalendarItems>;
}

pub trait SupervisorLookup: Send + Sync {
    fn is_supervisor_of(&self, viewer_id: &str, owner_id: &str, scope: &str) -> PlanResult<bool>;
}

/// A read-modify-write step over one ledger record. Returning `Ok(None)`
/// leaves the record untouched.
pub type Step<'a> = &'a mut dyn FnMut(&MonthRecord) -> PlanResult<Option<MonthRecord>>;

/// Persistent per (user, month) governance records.
///
/// Implementations must make [`MonthLedger::transition`] atomic per pair so
/// that racing writers see each other's result instead of creating duplicates.
pub trait MonthLedger: Send + Sync {
    /// The record for the pair, `Closed` if none exists.
    fn record(&self, user_id: &str, month: MonthToken) -> PlanResult<MonthRecord>;

    /// Months with a stored record (open or confirmed).
    fn recorded_months(&self, user_id: &str) -> PlanResult<BTreeSet<MonthToken>>;

    /// Apply `step` to the current record and persist the result. A result in
    /// the `Closed` state removes the record. Returns the record as stored.
    fn transition(
        &self,
        user_id: &str,
        month: MonthToken,
        step: Step<'_>,
    ) -> PlanResult<MonthRecord>;
}
