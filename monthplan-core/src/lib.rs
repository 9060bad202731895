//! Core of monthplan: monthly goal planning with a temporal governance layer.
//!
//! This crate provides:
//! - `calendar` tokens (`YYYY-MM`, `YYYY-Www`, `YYYY-MM-DD`) and grid math
//! - `Planner`, which opens future months, confirms plans and builds the
//!   month, week and day views behind a visibility gate
//! - storage seams (`store`) with in-memory and on-disk implementations

pub mod aggregator;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod confirmation;
pub mod error;
pub mod identity;
pub mod local;
pub mod memory;
pub mod month_state;
pub mod plan_state;
pub mod planner;
pub mod registry;
pub mod store;
pub mod visibility;

pub use aggregator::{DayCell, DayView, GoalSummary, MonthView, TaskProgress, WeekRow, WeekView};
pub use calendar::{MonthToken, WeekToken, parse_date};
pub use clock::{Clock, FixedClock, PlanningClock, SystemClock};
pub use config::PlannerConfig;
pub use confirmation::PlanningStatus;
pub use error::{PlanError, PlanResult, TokenKind};
pub use identity::{Role, Viewer};
pub use month_state::MonthState;
pub use plan_state::{MonthRecord, PlanState};
pub use planner::Planner;
pub use registry::OpenedMonth;
