//! Plan year calendar helpers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Calendar year a goal plan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanYear {
    /// Calendar year.
    pub year: i32,
    /// First day of the year.
    pub start_date: NaiveDate,
    /// Last day of the year.
    pub end_date: NaiveDate,
}

impl PlanYear {
    /// Returns the plan year for `year`, or `None` if chrono cannot
    /// represent it.
    #[must_use]
    pub fn new(year: i32) -> Option<Self> {
        Some(Self {
            year,
            start_date: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end_date: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    /// Number of days in the year.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Returns true if the given date falls within this year.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Share of the year elapsed at the end of `as_of`, within (0, 1].
    ///
    /// Dates before the year count as its first day; dates after it as a
    /// complete year.
    #[must_use]
    pub fn elapsed_fraction(&self, as_of: NaiveDate) -> Decimal {
        let days = self.days();
        let elapsed = ((as_of - self.start_date).num_days() + 1).clamp(1, days);
        Decimal::from(elapsed) / Decimal::from(days)
    }
}
