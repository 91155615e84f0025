//! Fiscal period utilities
//!
//! Financial-year, quarter, and rolling-month window calculations used by
//! the revenue metrics engine. The portal follows the Indian financial
//! year convention: April 1 through March 31.
//!
//! # Timezone policy
//!
//! All period boundaries are computed in UTC. Windows are inclusive of
//! both the start instant (00:00:00.000) and the end instant
//! (23:59:59.999). Date membership checks compare calendar dates, so an
//! invoice dated on a window's boundary day always falls inside it.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First month of the financial year (April)
pub const FY_START_MONTH: u32 = 4;

/// Errors related to fiscal period construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FiscalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("Invalid calendar month: {0}")]
    InvalidMonth(u32),
}

/// An inclusive period window used for bucketing revenue figures
///
/// The window spans from 00:00:00.000 on the start date to 23:59:59.999
/// on the end date, both in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodWindow {
    /// Creates a window spanning the given dates, both inclusive
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FiscalError> {
        if start > end {
            return Err(FiscalError::InvalidPeriod { start, end });
        }
        Ok(Self {
            start: start_of_day(start),
            end: end_of_day(end),
        })
    }

    /// Returns the first calendar date of the window
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Returns the last calendar date of the window
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Returns true if the given date falls within the window
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Returns true if the date range [start, end] overlaps this window
    pub fn overlaps_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end_date() && end >= self.start_date()
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day is always a valid time")
        .and_utc()
}

/// A financial year under the Indian convention (April 1 - March 31)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FinancialYear {
    /// Calendar year in which the financial year starts
    pub start_year: i32,
}

impl FinancialYear {
    /// Returns the financial year containing the given date
    ///
    /// A date in January-March belongs to the financial year that started
    /// the previous April.
    pub fn containing(date: NaiveDate) -> Self {
        let start_year = if date.month() >= FY_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self { start_year }
    }

    /// April 1 of the start year
    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, FY_START_MONTH, 1)
            .expect("April 1 is always valid")
    }

    /// March 31 of the following year
    pub fn end(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year + 1, 3, 31)
            .expect("March 31 is always valid")
    }

    /// The full-year window
    pub fn window(&self) -> PeriodWindow {
        PeriodWindow::new(self.start(), self.end())
            .expect("financial year bounds are ordered")
    }

    /// Returns true if the date falls inside this financial year
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// Returns true if the date range [start, end] overlaps this financial year
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end() && end >= self.start()
    }

    /// Display label, e.g. "FY2024-25"
    pub fn label(&self) -> String {
        format!("FY{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

/// A quarter of the financial year
///
/// Q1 = Apr-Jun, Q2 = Jul-Sep, Q3 = Oct-Dec, Q4 = Jan-Mar. Quarters are
/// anchored to the financial year containing the reference date, not to a
/// caller-supplied year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalQuarter {
    pub year: FinancialYear,
    /// Quarter index, 1 through 4
    pub index: u8,
}

impl FiscalQuarter {
    /// Returns the fiscal quarter containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        let year = FinancialYear::containing(date);
        let index = match date.month() {
            4..=6 => 1,
            7..=9 => 2,
            10..=12 => 3,
            _ => 4,
        };
        Self { year, index }
    }

    /// First date of the quarter
    pub fn start(&self) -> NaiveDate {
        let (y, m) = match self.index {
            1 => (self.year.start_year, 4),
            2 => (self.year.start_year, 7),
            3 => (self.year.start_year, 10),
            _ => (self.year.start_year + 1, 1),
        };
        NaiveDate::from_ymd_opt(y, m, 1).expect("quarter start is always valid")
    }

    /// Last date of the quarter
    pub fn end(&self) -> NaiveDate {
        let (y, m) = match self.index {
            1 => (self.year.start_year, 6),
            2 => (self.year.start_year, 9),
            3 => (self.year.start_year, 12),
            _ => (self.year.start_year + 1, 3),
        };
        last_day_of_month(y, m)
    }

    /// The quarter window
    pub fn window(&self) -> PeriodWindow {
        PeriodWindow::new(self.start(), self.end())
            .expect("quarter bounds are ordered")
    }

    /// Display label, e.g. "Q2 FY2024-25"
    pub fn label(&self) -> String {
        format!("Q{} {}", self.index, self.year.label())
    }
}

/// A single calendar month with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl MonthWindow {
    /// Builds the window for a calendar (year, month)
    pub fn of(year: i32, month: u32) -> Result<Self, FiscalError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(FiscalError::InvalidMonth(month))?;
        let end = last_day_of_month(year, month);
        Ok(Self {
            start,
            end,
            label: start.format("%b %Y").to_string(),
        })
    }

    /// The month as an inclusive period window
    pub fn window(&self) -> PeriodWindow {
        PeriodWindow::new(self.start, self.end)
            .expect("month bounds are ordered")
    }
}

/// Returns the last `count` full calendar months ending at `as_of`'s
/// month, oldest first
pub fn rolling_months(as_of: NaiveDate, count: u32) -> Vec<MonthWindow> {
    let mut months = Vec::with_capacity(count as usize);
    let (mut year, mut month) = (as_of.year(), as_of.month());
    for _ in 0..count {
        months.push(
            MonthWindow::of(year, month).expect("month within rolling window is valid"),
        );
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    months.reverse();
    months
}

/// Inclusive count of calendar months between two dates
///
/// `(end.year - start.year) * 12 + (end.month - start.month) + 1`, with a
/// floor of one month. This is the pro-ration divisor for license
/// coverage windows: a license from Jan 1 to Dec 31 spans 12 months.
pub fn months_spanned(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) * 12
        + end.month() as i32
        - start.month() as i32
        + 1;
    months.max(1) as u32
}

/// Returns the last day of a calendar month
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_y, next_m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_y, next_m, 1)
        .expect("first of month is always valid")
        - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fy_containing_january_belongs_to_previous_april() {
        let fy = FinancialYear::containing(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(fy.start(), NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
        assert_eq!(fy.end(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_fy_containing_may_starts_same_year() {
        let fy = FinancialYear::containing(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(fy.start(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(fy.end(), NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn test_fy_boundary_days() {
        let fy = FinancialYear { start_year: 2024 };
        assert!(fy.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(fy.contains(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
        assert!(!fy.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!fy.contains(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
    }

    #[test]
    fn test_quarter_oct_is_q3() {
        let q = FiscalQuarter::containing(NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
        assert_eq!(q.index, 3);
        assert_eq!(q.start(), NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(q.end(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_quarter_feb_is_q4_of_previous_fy() {
        let q = FiscalQuarter::containing(NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
        assert_eq!(q.index, 4);
        assert_eq!(q.year.start_year, 2024);
        assert_eq!(q.start(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(q.end(), NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn test_rolling_months_cross_year_boundary() {
        let windows = rolling_months(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(), 6);
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0].label, "Sep 2023");
        assert_eq!(windows[5].label, "Feb 2024");
        assert_eq!(windows[5].start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(windows[5].end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_months_spanned_full_year() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(months_spanned(start, end), 12);
    }

    #[test]
    fn test_months_spanned_floors_at_one() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(months_spanned(d, d), 1);
        // Inverted ranges clamp rather than underflow
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(months_spanned(d, earlier), 1);
    }

    #[test]
    fn test_period_window_inclusive_bounds() {
        let w = PeriodWindow::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        )
        .unwrap();
        assert!(w.contains_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(w.contains_date(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()));
        assert!(!w.contains_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        assert_eq!(w.end.time(), chrono::NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
    }

    #[test]
    fn test_period_window_rejects_inverted_range() {
        let result = PeriodWindow::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        );
        assert!(matches!(result, Err(FiscalError::InvalidPeriod { .. })));
    }
}
