//! `YYYY-MM` month tokens.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::date::is_digits;
use crate::error::{PlanError, PlanResult, TokenKind};

const MAX_YEAR: i32 = 9999;

/// A calendar month, e.g. `2026-02`.
///
/// Stored as the first day of the month, so the derived ordering is
/// chronological and agrees with the ordering of the canonical strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthToken(NaiveDate);

impl MonthToken {
    /// Build a month from its parts. Years must fit in four digits.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(0..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(MonthToken)
    }

    /// The month a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        MonthToken(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0 + Days::new(u64::from(self.num_days() - 1))
    }

    pub fn num_days(&self) -> u32 {
        match self.month() {
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        MonthToken::of(date) == *self
    }

    /// The following month, rolling `12` over into January of the next year.
    pub fn next(&self) -> Option<Self> {
        self.0
            .checked_add_months(Months::new(1))
            .filter(|d| d.year() <= MAX_YEAR)
            .map(MonthToken)
    }

    /// The preceding month, rolling `01` back to December of the previous year.
    pub fn previous(&self) -> Option<Self> {
        self.0
            .checked_sub_months(Months::new(1))
            .filter(|d| d.year() >= 0)
            .map(MonthToken)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// True if `s` is exactly `YYYY-MM` with a month between `01` and `12`.
pub fn is_valid_month(s: &str) -> bool {
    s.parse::<MonthToken>().is_ok()
}

/// Chronological comparison of two months.
pub fn compare_months(a: &MonthToken, b: &MonthToken) -> Ordering {
    a.cmp(b)
}

impl FromStr for MonthToken {
    type Err = PlanError;

    fn from_str(s: &str) -> PlanResult<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 7
            || bytes[4] != b'-'
            || !is_digits(&bytes[..4])
            || !is_digits(&bytes[5..])
        {
            return Err(PlanError::invalid(TokenKind::Month, s));
        }

        let year: i32 = s[..4]
            .parse()
            .map_err(|_| PlanError::invalid(TokenKind::Month, s))?;
        let month: u32 = s[5..]
            .parse()
            .map_err(|_| PlanError::invalid(TokenKind::Month, s))?;

        MonthToken::new(year, month).ok_or_else(|| PlanError::invalid(TokenKind::Month, s))
    }
}

impl TryFrom<String> for MonthToken {
    type Error = PlanError;

    fn try_from(value: String) -> PlanResult<Self> {
        value.parse()
    }
}

impl From<MonthToken> for String {
    fn from(month: MonthToken) -> Self {
        month.to_string()
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
