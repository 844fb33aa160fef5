//! Concrete date windows
//!
//! A `PeriodWindow` is an inclusive range of calendar dates: a month, an ISO
//! week or a year. Budget periods resolve to these windows.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive range of calendar dates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PeriodWindow {
    /// Calendar month (e.g., "2025-01")
    Month { year: i32, month: u32 },

    /// ISO week (e.g., "2025-W03")
    Week { year: i32, week: u32 },

    /// Calendar year (e.g., "2025")
    Year { year: i32 },
}

impl PeriodWindow {
    /// Create a monthly window
    pub fn month(year: i32, month: u32) -> Self {
        Self::Month { year, month }
    }

    /// Create a weekly window (ISO week)
    pub fn week(year: i32, week: u32) -> Self {
        Self::Week { year, week }
    }

    /// Create a yearly window
    pub fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// The calendar month containing `date`
    pub fn month_containing(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The ISO week containing `date`
    pub fn week_containing(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self::Week {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// The calendar year containing `date`
    pub fn year_containing(date: NaiveDate) -> Self {
        Self::Year { year: date.year() }
    }

    /// Get the start date of this window
    ///
    /// Out-of-range months and weeks fall back to January 1st of the year.
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Month { year, month } => {
                NaiveDate::from_ymd_opt(*year, *month, 1).unwrap_or_else(|| first_of_year(*year))
            }
            Self::Week { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon)
                .unwrap_or_else(|| first_of_year(*year)),
            Self::Year { year } => first_of_year(*year),
        }
    }

    /// Get the end date of this window (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Month { year, month } => match days_in_month(*year, *month) {
                Some(days) => self.start_date() + Duration::days(i64::from(days) - 1),
                None => self.start_date(),
            },
            Self::Week { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Sun)
                .unwrap_or_else(|| self.start_date() + Duration::days(6)),
            Self::Year { year } => {
                NaiveDate::from_ymd_opt(*year, 12, 31).unwrap_or_else(|| first_of_year(*year))
            }
        }
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Get the previous window of the same kind
    pub fn prev(&self) -> Self {
        match self {
            Self::Month { year, month } => {
                if *month <= 1 {
                    Self::Month {
                        year: *year - 1,
                        month: 12,
                    }
                } else {
                    Self::Month {
                        year: *year,
                        month: *month - 1,
                    }
                }
            }
            Self::Week { year, week } => {
                if *week <= 1 {
                    let prev_year = *year - 1;
                    Self::Week {
                        year: prev_year,
                        week: iso_weeks_in_year(prev_year),
                    }
                } else {
                    Self::Week {
                        year: *year,
                        week: *week - 1,
                    }
                }
            }
            Self::Year { year } => Self::Year { year: *year - 1 },
        }
    }

    /// Parse a calendar month written as "YYYY-MM"
    pub fn parse_month(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self::Month { year, month })
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Week { year, week } => write!(f, "{:04}-W{:02}", year, week),
            Self::Year { year } => write!(f, "{:04}", year),
        }
    }
}

/// Number of days in a calendar month, or `None` for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

/// Number of ISO weeks in a year (52 or 53)
pub fn iso_weeks_in_year(year: i32) -> u32 {
    // Dec 28th is always in the last ISO week of its year
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|d| d.iso_week().week())
        .unwrap_or(52)
}

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
