//! The planner ties the clock, the ledger and the external stores together and
//! exposes every governance operation.

use std::sync::Arc;

use crate::calendar::MonthToken;
use crate::clock::PlanningClock;
use crate::config::PlannerConfig;
use crate::error::PlanResult;
use crate::local::{FileLedger, FileStore, PlanDir};
use crate::month_state::MonthState;
use crate::store::{ActivityStore, GoalStore, MonthLedger, SupervisorLookup};

#[derive(Clone)]
pub struct Planner {
    pub(crate) ledger: Arc<dyn MonthLedger>,
    pub(crate) goals: Arc<dyn GoalStore>,
    pub(crate) items: Arc<dyn ActivityStore>,
    pub(crate) supervisors: Arc<dyn SupervisorLookup>,
    pub(crate) clock: PlanningClock,
}

impl Planner {
    pub fn new(
        ledger: Arc<dyn MonthLedger>,
        goals: Arc<dyn GoalStore>,
        items: Arc<dyn ActivityStore>,
        supervisors: Arc<dyn SupervisorLookup>,
        clock: PlanningClock,
    ) -> Self {
        Planner {
            ledger,
            goals,
            items,
            supervisors,
            clock,
        }
    }

    /// A planner over a planning directory on disk.
    pub fn from_dir(dir: PlanDir, clock: PlanningClock) -> Self {
        let store = Arc::new(FileStore::new(dir.clone()));
        Planner::new(
            Arc::new(FileLedger::new(dir)),
            store.clone(),
            store.clone(),
            store,
            clock,
        )
    }

    /// A planner over the configured data directory, on the system clock.
    pub fn from_config(config: &PlannerConfig) -> PlanResult<Self> {
        let clock = PlanningClock::system(config.tz()?);
        Ok(Planner::from_dir(PlanDir::new(config.data_path()), clock))
    }

    pub fn clock(&self) -> &PlanningClock {
        &self.clock
    }

    pub fn current_month(&self) -> MonthToken {
        self.clock.current_month()
    }

    /// State of `month` for `user_id` as of now.
    pub fn month_state(&self, user_id: &str, month: MonthToken) -> PlanResult<MonthState> {
        let opened = self.opened_months(user_id)?;
        Ok(MonthState::resolve(month, self.current_month(), &opened))
    }
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner").field("clock", &self.clock).finish()
    }
}
