//! Goals, calendar items and supervisor links read from the planning directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::MonthToken;
use crate::error::PlanResult;
use crate::local::{PlanDir, read_toml, write_toml};
use crate::store::{ActivityStore, CalendarItems, Goal, GoalStore, SupervisorLookup};

#[derive(Debug, Default, Serialize, Deserialize)]
struct GoalsFile {
    #[serde(default)]
    goals: Vec<Goal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupervisorLink {
    pub supervisor: String,
    pub member: String,
    #[serde(default)]
    pub scope: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SupervisorsFile {
    #[serde(default)]
    links: Vec<SupervisorLink>,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PlanDir,
}

impl FileStore {
    pub fn new(dir: PlanDir) -> Self {
        FileStore { dir }
    }

    /// Replace the goals for one month. Goal editing happens elsewhere; this
    /// exists for imports and fixtures.
    pub fn save_goals(&self, user_id: &str, month: MonthToken, goals: Vec<Goal>) -> PlanResult<()> {
        let path = self.goals_path(user_id, month)?;
        write_toml(&path, &GoalsFile { goals })
    }

    pub fn save_calendar(&self, user_id: &str, items: &CalendarItems) -> PlanResult<()> {
        let path = self.dir.user_dir(user_id)?.join("calendar.toml");
        write_toml(&path, items)
    }

    pub fn supervisor_links(&self) -> PlanResult<Vec<SupervisorLink>> {
        let file: SupervisorsFile = read_toml(&self.dir.supervisors_path())?;
        Ok(file.links)
    }

    fn goals_path(&self, user_id: &str, month: MonthToken) -> PlanResult<std::path::PathBuf> {
        Ok(self
            .dir
            .user_dir(user_id)?
            .join("goals")
            .join(format!("{month}.toml")))
    }
}

impl GoalStore for FileStore {
    fn list_goals(&self, user_id: &str, month: MonthToken) -> PlanResult<Vec<Goal>> {
        let file: GoalsFile = read_toml(&self.goals_path(user_id, month)?)?;
        Ok(file.goals)
    }
}

impl ActivityStore for FileStore {
    fn list_by_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> PlanResult<CalendarItems> {
        let path = self.dir.user_dir(user_id)?.join("calendar.toml");
        let items: CalendarItems = read_toml(&path)?;
        Ok(items.within(from, to))
    }
}

impl SupervisorLookup for FileStore {
    fn is_supervisor_of(&self, viewer_id: &str, owner_id: &str, scope: &str) -> PlanResult<bool> {
        Ok(self.supervisor_links()?.iter().any(|link| {
            link.supervisor == viewer_id && link.member == owner_id && link.scope == scope
        }))
    }
}
