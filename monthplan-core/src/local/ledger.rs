//! Month ledger stored as one TOML file per user.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::PathBuf;

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthToken;
use crate::error::{PlanError, PlanResult};
use crate::local::{PlanDir, read_toml, write_toml};
use crate::plan_state::MonthRecord;
use crate::store::{MonthLedger, Step};

const LEDGER_FILE: &str = "ledger.toml";
const LOCK_FILE: &str = "ledger.lock";

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    months: BTreeMap<MonthToken, MonthRecord>,
}

/// `users/<user>/ledger.toml`, guarded by an exclusive lock on
/// `users/<user>/ledger.lock` while a transition runs.
#[derive(Debug, Clone)]
pub struct FileLedger {
    dir: PlanDir,
}

impl FileLedger {
    pub fn new(dir: PlanDir) -> Self {
        FileLedger { dir }
    }

    fn path(&self, user_id: &str) -> PlanResult<PathBuf> {
        Ok(self.dir.user_dir(user_id)?.join(LEDGER_FILE))
    }

    fn load(&self, user_id: &str) -> PlanResult<LedgerFile> {
        read_toml(&self.path(user_id)?)
    }
}

impl MonthLedger for FileLedger {
    fn record(&self, user_id: &str, month: MonthToken) -> PlanResult<MonthRecord> {
        Ok(self
            .load(user_id)?
            .months
            .get(&month)
            .copied()
            .unwrap_or_default())
    }

    fn recorded_months(&self, user_id: &str) -> PlanResult<BTreeSet<MonthToken>> {
        Ok(self.load(user_id)?.months.into_keys().collect())
    }

    fn transition(
        &self,
        user_id: &str,
        month: MonthToken,
        step: Step<'_>,
    ) -> PlanResult<MonthRecord> {
        let user_dir = self.dir.user_dir(user_id)?;
        std::fs::create_dir_all(&user_dir)?;

        let lock = File::create(user_dir.join(LOCK_FILE))?;
        lock.lock_exclusive()
            .map_err(|e| {
                PlanError::Storage(format!("Could not lock ledger for '{user_id}': {e}"))
            })?;

        let mut ledger = self.load(user_id)?;
        let current = ledger.months.get(&month).copied().unwrap_or_default();

        let result = match step(&current)? {
            None => current,
            Some(next) => {
                if next.is_recorded() {
                    ledger.months.insert(month, next);
                } else {
                    ledger.months.remove(&month);
                }
                write_toml(&user_dir.join(LEDGER_FILE), &ledger)?;
                next
            }
        };

        FileExt::unlock(&lock)
            .map_err(|e| {
                PlanError::Storage(format!("Could not unlock ledger for '{user_id}': {e}"))
            })?;

        Ok(result)
    }
}
