use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::{AppError, AppResult};

/// Half-open `[start, end)` range of meeting start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn out_of_range(what: &str) -> AppError {
    AppError::InvalidArgument(format!("{} is outside the supported calendar range", what))
}

impl TimeWindow {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn day(date: NaiveDate) -> AppResult<Self> {
        let next = date.succ_opt().ok_or_else(|| out_of_range("date"))?;
        Ok(Self {
            start: midnight(date),
            end: midnight(next),
        })
    }

    /// Monday-based week holding `date`.
    pub fn week_of(date: NaiveDate) -> AppResult<Self> {
        let monday = date
            .checked_sub_signed(Duration::days(i64::from(date.weekday().num_days_from_monday())))
            .ok_or_else(|| out_of_range("week"))?;
        let start = midnight(monday);
        let end = start
            .checked_add_signed(Duration::days(7))
            .ok_or_else(|| out_of_range("week"))?;
        Ok(Self { start, end })
    }

    pub fn month(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidArgument(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| out_of_range("month"))?;
        let (next_year, next_month) = if month == 12 {
            (year.checked_add(1).ok_or_else(|| out_of_range("month"))?, 1)
        } else {
            (year, month + 1)
        };
        let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .ok_or_else(|| out_of_range("month"))?;
        Ok(Self {
            start: midnight(first),
            end: midnight(next),
        })
    }

    pub fn month_of(date: NaiveDate) -> AppResult<Self> {
        Self::month(date.year(), date.month())
    }

    pub fn year(year: i32) -> AppResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| out_of_range("year"))?;
        let next = year
            .checked_add(1)
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .ok_or_else(|| out_of_range("year"))?;
        Ok(Self {
            start: midnight(first),
            end: midnight(next),
        })
    }

    pub fn year_of(date: NaiveDate) -> AppResult<Self> {
        Self::year(date.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn day_window_excludes_next_midnight() {
        let window = TimeWindow::day(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).unwrap();
        assert!(window.contains(at(2024, 2, 29, 0, 0)));
        assert!(window.contains(at(2024, 2, 29, 23, 59)));
        assert!(!window.contains(at(2024, 3, 1, 0, 0)));
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-03-14 is a Thursday.
        let window = TimeWindow::week_of(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()).unwrap();
        assert_eq!(window.start, at(2024, 3, 11, 0, 0));
        assert_eq!(window.end, at(2024, 3, 18, 0, 0));

        let monday = TimeWindow::week_of(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()).unwrap();
        assert_eq!(monday, window);

        let sunday = TimeWindow::week_of(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap()).unwrap();
        assert_eq!(sunday, window);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let window = TimeWindow::month(2023, 12).unwrap();
        assert_eq!(window.start, at(2023, 12, 1, 0, 0));
        assert_eq!(window.end, at(2024, 1, 1, 0, 0));
    }

    #[test]
    fn month_boundary_belongs_to_later_month() {
        let feb = TimeWindow::month(2024, 2).unwrap();
        let mar = TimeWindow::month(2024, 3).unwrap();
        let boundary = at(2024, 3, 1, 0, 0);
        assert!(!feb.contains(boundary));
        assert!(mar.contains(boundary));
        assert_eq!(feb.end, mar.start);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(matches!(TimeWindow::month(2024, 0), Err(AppError::InvalidArgument(_))));
        assert!(matches!(TimeWindow::month(2024, 13), Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn year_window_spans_calendar_year() {
        let window = TimeWindow::year(2024).unwrap();
        assert_eq!(window.start, at(2024, 1, 1, 0, 0));
        assert_eq!(window.end, at(2025, 1, 1, 0, 0));
        assert!(!window.contains(at(2025, 1, 1, 0, 0)));
        assert!(matches!(TimeWindow::year(i32::MAX), Err(AppError::InvalidArgument(_))));
    }
}
