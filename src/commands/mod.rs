pub mod config;
pub mod confirm;
pub mod open;
pub mod score;
pub mod status;
pub mod unconfirm;
pub mod view;

use anyhow::Result;
use chrono::NaiveDate;
use monthplan_core::{MonthToken, Planner, PlannerConfig, Viewer, WeekToken, parse_date};
use serde::Serialize;

/// Everything a command needs: the planner, who is acting, and how to print.
pub struct Context {
    pub planner: Planner,
    pub viewer: Viewer,
    pub config: PlannerConfig,
    pub json: bool,
}

impl Context {
    /// The plan owner: `--of` when given, otherwise the acting user.
    pub fn owner<'a>(&'a self, of: Option<&'a str>) -> &'a str {
        of.unwrap_or(&self.viewer.user_id)
    }

    pub fn month(&self, arg: Option<&str>) -> Result<MonthToken> {
        match arg {
            Some(s) => Ok(s.parse()?),
            None => Ok(self.planner.current_month()),
        }
    }

    pub fn week(&self, arg: Option<&str>) -> Result<WeekToken> {
        match arg {
            Some(s) => Ok(s.parse()?),
            None => Ok(WeekToken::of_date(self.planner.clock().today())),
        }
    }

    pub fn date(&self, arg: Option<&str>) -> Result<NaiveDate> {
        match arg {
            Some(s) => Ok(parse_date(s)?),
            None => Ok(self.planner.clock().today()),
        }
    }

    /// Print `value` as pretty JSON with `--json`, otherwise as `text` renders it.
    pub fn print<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text(value));
        }
        Ok(())
    }
}
