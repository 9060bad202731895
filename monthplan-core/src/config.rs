//! Global monthplan configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

static DEFAULT_DATA_DIR: &str = "~/monthplan";
const DEFAULT_PORT: u16 = 4097;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Configuration at ~/.config/monthplan/config.toml, overridable with
/// `MONTHPLAN_*` environment variables (e.g. `MONTHPLAN_TIMEZONE`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Where the planning directory lives.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// IANA timezone that defines month and day boundaries.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Port for monthplan-server.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_dir: default_data_dir(),
            timezone: default_timezone(),
            port: default_port(),
        }
    }
}

impl PlannerConfig {
    pub fn config_path() -> PlanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlanError::Config("Could not determine config directory".into()))?
            .join("monthplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template on first
    /// use.
    pub fn load() -> PlanResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> PlanResult<Self> {
        let config: PlannerConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("MONTHPLAN"))
            .build()
            .map_err(|e| PlanError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlanError::Config(e.to_string()))?;

        // Reject a bad timezone at startup rather than on first request.
        config.tz()?;
        Ok(config)
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn tz(&self) -> PlanResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| PlanError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlanResult<()> {
        let contents = format!(
            "\
# monthplan configuration

# Where planning data lives:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Timezone that decides when a month or day starts (IANA name):
# timezone = \"UTC\"

# Port for monthplan-server:
# port = {DEFAULT_PORT}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
