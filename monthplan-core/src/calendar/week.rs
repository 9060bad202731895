//! `YYYY-Wnn` ISO-8601 week tokens.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::date::is_digits;
use crate::calendar::month::MonthToken;
use crate::error::{PlanError, PlanResult, TokenKind};

/// An ISO week, e.g. `2026-W09`.
///
/// Weeks start on Monday and week 1 is the week holding the year's first
/// Thursday. Stored as the week's Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekToken(NaiveDate);

impl WeekToken {
    /// Build a week from ISO year and week number. Returns `None` for week 53
    /// in years that only have 52 weeks.
    pub fn new(year: i32, week: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).map(WeekToken)
    }

    /// The ISO week a date falls in.
    pub fn of_date(date: NaiveDate) -> Self {
        WeekToken(date - Days::new(u64::from(date.weekday().num_days_from_monday())))
    }

    /// ISO week-numbering year, which differs from the calendar year around
    /// New Year.
    pub fn year(&self) -> i32 {
        self.0.iso_week().year()
    }

    pub fn week(&self) -> u32 {
        self.0.iso_week().week()
    }

    pub fn monday(&self) -> NaiveDate {
        self.0
    }

    pub fn sunday(&self) -> NaiveDate {
        self.0 + Days::new(6)
    }

    /// Monday through Sunday.
    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| self.0 + Days::new(i as u64))
    }

    /// The month holding this week's Thursday. Weeks that straddle a month
    /// boundary belong to exactly one month this way.
    pub fn month(&self) -> MonthToken {
        MonthToken::of(self.0 + Days::new(3))
    }
}

impl FromStr for WeekToken {
    type Err = PlanError;

    fn from_str(s: &str) -> PlanResult<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 8
            || bytes[4] != b'-'
            || bytes[5] != b'W'
            || !is_digits(&bytes[..4])
            || !is_digits(&bytes[6..])
        {
            return Err(PlanError::invalid(TokenKind::Week, s));
        }

        let year: i32 = s[..4]
            .parse()
            .map_err(|_| PlanError::invalid(TokenKind::Week, s))?;
        let week: u32 = s[6..]
            .parse()
            .map_err(|_| PlanError::invalid(TokenKind::Week, s))?;

        WeekToken::new(year, week).ok_or_else(|| PlanError::invalid(TokenKind::Week, s))
    }
}

impl TryFrom<String> for WeekToken {
    type Error = PlanError;

    fn try_from(value: String) -> PlanResult<Self> {
        value.parse()
    }
}

impl From<WeekToken> for String {
    fn from(week: WeekToken) -> Self {
        week.to_string()
    }
}

impl fmt::Display for WeekToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year(), self.week())
    }
}
