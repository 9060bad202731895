//! File-backed planning directory.
//!
//! ```text
//! <data_dir>/
//!   supervisors.toml
//!   users/<user>/ledger.toml
//!   users/<user>/goals/YYYY-MM.toml
//!   users/<user>/calendar.toml
//! ```
//!
//! Timestamps in the TOML files are RFC 3339 strings, e.g.
//! `at = "2026-02-03T09:30:00Z"`.

mod ledger;
mod records;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PlanError, PlanResult, TokenKind};

pub use ledger::FileLedger;
pub use records::{FileStore, SupervisorLink};

const MAX_USER_ID_LEN: usize = 64;

/// Root of a planning directory.
#[derive(Debug, Clone)]
pub struct PlanDir {
    root: PathBuf,
}

impl PlanDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PlanDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one user's files. User ids become path segments, so
    /// only `[A-Za-z0-9_-]` is accepted.
    pub fn user_dir(&self, user_id: &str) -> PlanResult<PathBuf> {
        validate_user_id(user_id)?;
        Ok(self.root.join("users").join(user_id))
    }

    pub fn supervisors_path(&self) -> PathBuf {
        self.root.join("supervisors.toml")
    }
}

pub fn validate_user_id(user_id: &str) -> PlanResult<()> {
    let valid = !user_id.is_empty()
        && user_id.len() <= MAX_USER_ID_LEN
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(PlanError::invalid(TokenKind::UserId, user_id))
    }
}

/// Read a TOML file, or the default value if it does not exist.
pub(crate) fn read_toml<T: DeserializeOwned + Default>(path: &Path) -> PlanResult<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| PlanError::Serialization(format!("{}: {}", path.display(), e)))
}

/// Write a TOML file through a temp file and rename.
pub(crate) fn write_toml<T: Serialize>(path: &Path, value: &T) -> PlanResult<()> {
    let content =
        toml::to_string_pretty(value).map_err(|e| PlanError::Serialization(e.to_string()))?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let temp = path.with_extension("toml.tmp");
    std::fs::write(&temp, content)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}
