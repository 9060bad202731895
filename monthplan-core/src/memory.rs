//! In-process stores, used by tests and embedders without a planning directory.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, Utc};

use crate::calendar::MonthToken;
use crate::error::{PlanError, PlanResult};
use crate::plan_state::MonthRecord;
use crate::store::{
    Activity, ActivityStore, CalendarItems, Goal, GoalStore, Meeting, MonthLedger, Step,
    SupervisorLookup,
};

fn poisoned() -> PlanError {
    PlanError::Storage("in-memory store lock poisoned".into())
}

/// Ledger kept in a map. The mutex is held across each transition.
#[derive(Default)]
pub struct MemoryLedger {
    records: Mutex<HashMap<(String, MonthToken), MonthRecord>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, across all users.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MonthLedger for MemoryLedger {
    fn record(&self, user_id: &str, month: MonthToken) -> PlanResult<MonthRecord> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        Ok(records
            .get(&(user_id.to_string(), month))
            .copied()
            .unwrap_or_default())
    }

    fn recorded_months(&self, user_id: &str) -> PlanResult<BTreeSet<MonthToken>> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        Ok(records
            .keys()
            .filter(|(user, _)| user == user_id)
            .map(|(_, month)| *month)
            .collect())
    }

    fn transition(
        &self,
        user_id: &str,
        month: MonthToken,
        step: Step<'_>,
    ) -> PlanResult<MonthRecord> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;
        let key = (user_id.to_string(), month);
        let current = records.get(&key).copied().unwrap_or_default();

        let Some(next) = step(&current)? else {
            return Ok(current);
        };

        if next.is_recorded() {
            records.insert(key, next);
        } else {
            records.remove(&key);
        }
        Ok(next)
    }
}

/// Goals, calendar items and supervisor links held in memory.
#[derive(Default)]
pub struct MemoryStore {
    goals: RwLock<HashMap<(String, MonthToken), Vec<Goal>>>,
    items: RwLock<HashMap<String, CalendarItems>>,
    links: RwLock<HashSet<(String, String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_goals(&self, user_id: &str, month: MonthToken, goals: Vec<Goal>) -> PlanResult<()> {
        let mut map = self.goals.write().map_err(|_| poisoned())?;
        map.insert((user_id.to_string(), month), goals);
        Ok(())
    }

    pub fn add_activity(&self, user_id: &str, activity: Activity) -> PlanResult<()> {
        let mut map = self.items.write().map_err(|_| poisoned())?;
        map.entry(user_id.to_string())
            .or_default()
            .activities
            .push(activity);
        Ok(())
    }

    pub fn add_meeting(&self, user_id: &str, meeting: Meeting) -> PlanResult<()> {
        let mut map = self.items.write().map_err(|_| poisoned())?;
        map.entry(user_id.to_string()).or_default().meetings.push(meeting);
        Ok(())
    }

    pub fn link_supervisor(
        &self,
        supervisor_id: &str,
        member_id: &str,
        scope: &str,
    ) -> PlanResult<()> {
        let mut links = self.links.write().map_err(|_| poisoned())?;
        links.insert((
            supervisor_id.to_string(),
            member_id.to_string(),
            scope.to_string(),
        ));
        Ok(())
    }
}

impl GoalStore for MemoryStore {
    fn list_goals(&self, user_id: &str, month: MonthToken) -> PlanResult<Vec<Goal>> {
        let map = self.goals.read().map_err(|_| poisoned())?;
        Ok(map
            .get(&(user_id.to_string(), month))
            .cloned()
            .unwrap_or_default())
    }
}

impl ActivityStore for MemoryStore {
    fn list_by_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> PlanResult<CalendarItems> {
        let map = self.items.read().map_err(|_| poisoned())?;
        let Some(items) = map.get(user_id) else {
            return Ok(CalendarItems::default());
        };
        Ok(items.within(from, to))
    }
}

impl SupervisorLookup for MemoryStore {
    fn is_supervisor_of(&self, viewer_id: &str, owner_id: &str, scope: &str) -> PlanResult<bool> {
        let links = self.links.read().map_err(|_| poisoned())?;
        Ok(links.contains(&(
            viewer_id.to_string(),
            owner_id.to_string(),
            scope.to_string(),
        )))
    }
}
