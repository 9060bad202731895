use std::sync::Arc;

use anyhow::Result;
use monthplan_core::{Planner, PlannerConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<Planner>,
}

impl AppState {
    pub fn new(planner: Planner) -> Self {
        AppState {
            planner: Arc::new(planner),
        }
    }

    /// State backed by the configured planning directory.
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        Ok(AppState::new(Planner::from_config(config)?))
    }
}
