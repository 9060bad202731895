//! Calendar math: month and week tokens, strict date parsing and month grids.
//!
//! Everything here is pure. "Today" is always passed in by the caller so the
//! functions stay deterministic under test.

mod date;
mod grid;
mod month;
mod week;

pub use date::parse_date;
pub use grid::{DayMeta, WeekMeta, calendar_grid, weeks_in_month};
pub use month::{MonthToken, compare_months, is_valid_month};
pub use week::WeekToken;
