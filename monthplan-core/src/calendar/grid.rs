//! Month grids padded to whole Monday-first weeks.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::month::MonthToken;
use crate::calendar::week::WeekToken;

/// One day slot in a rendered month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMeta {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub is_current_month: bool,
    pub is_today: bool,
}

impl DayMeta {
    pub fn new(date: NaiveDate, month: MonthToken, today: NaiveDate) -> Self {
        DayMeta {
            date,
            day_of_month: date.day(),
            is_current_month: month.contains(date),
            is_today: date == today,
        }
    }
}

/// One row of a month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekMeta {
    pub week: WeekToken,
    pub days: Vec<DayMeta>,
}

/// Every date from the Monday on or before the 1st through the Sunday on or
/// after the last day of `month`. The length is always a multiple of 7.
pub fn calendar_grid(month: MonthToken, today: NaiveDate) -> Vec<DayMeta> {
    let first = WeekToken::of_date(month.first_day()).monday();
    let last = WeekToken::of_date(month.last_day()).sunday();

    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| DayMeta::new(date, month, today))
        .collect()
}

/// The grid of `month` split into ISO weeks.
pub fn weeks_in_month(month: MonthToken, today: NaiveDate) -> Vec<WeekMeta> {
    calendar_grid(month, today)
        .chunks(7)
        .map(|days| WeekMeta {
            week: WeekToken::of_date(days[0].date),
            days: days.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn february_2026_grid() {
        let month: MonthToken = "2026-02".parse().unwrap();
        let grid = calendar_grid(month, date(2026, 2, 10));

        assert_eq!(grid.len() % 7, 0);
        assert_eq!(grid.first().unwrap().date.weekday(), Weekday::Mon);
        assert_eq!(grid.last().unwrap().date.weekday(), Weekday::Sun);

        let in_month: Vec<_> = grid.iter().filter(|d| d.is_current_month).collect();
        assert_eq!(in_month.len(), 28);
        assert_eq!(in_month.first().unwrap().date, date(2026, 2, 1));
        assert_eq!(in_month.last().unwrap().date, date(2026, 2, 28));

        let today: Vec<_> = grid.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day_of_month, 10);
    }

    #[test]
    fn padding_days_are_flagged_outside_month() {
        let month: MonthToken = "2026-02".parse().unwrap();
        let grid = calendar_grid(month, date(2026, 1, 1));
        // 2026-02-01 is a Sunday, so the grid opens on Monday 2026-01-26.
        assert_eq!(grid[0].date, date(2026, 1, 26));
        assert!(!grid[0].is_current_month);
        assert_eq!(grid[0].day_of_month, 26);
        assert!(grid.iter().all(|d| !d.is_today));
    }

    #[test]
    fn month_starting_on_monday_has_no_leading_padding() {
        // 2026-06-01 is a Monday.
        let month: MonthToken = "2026-06".parse().unwrap();
        let grid = calendar_grid(month, date(2026, 6, 1));
        assert_eq!(grid[0].date, date(2026, 6, 1));
        assert!(grid[0].is_current_month);
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn weeks_in_month_rows_are_full_weeks() {
        for token in ["2026-02", "2026-03", "2026-08", "2027-01"] {
            let month: MonthToken = token.parse().unwrap();
            let weeks = weeks_in_month(month, date(2026, 1, 1));
            assert_eq!(weeks.len() * 7, calendar_grid(month, date(2026, 1, 1)).len());
            for row in &weeks {
                assert_eq!(row.days.len(), 7);
                let label = row.week.to_string();
                let bytes = label.as_bytes();
                assert_eq!(bytes.len(), 8);
                assert!(bytes[..4].iter().all(u8::is_ascii_digit));
                assert_eq!(&label[4..6], "-W");
                assert!(bytes[6..].iter().all(u8::is_ascii_digit));
                assert_eq!(row.days[0].date, row.week.monday());
            }
        }
    }

    #[test]
    fn six_row_month() {
        // 2026-08-01 is a Saturday and August has 31 days.
        let month: MonthToken = "2026-08".parse().unwrap();
        assert_eq!(weeks_in_month(month, date(2026, 8, 1)).len(), 6);
    }
}
