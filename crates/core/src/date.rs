use std::{fmt, sync::Arc};

use chrono::{Datelike, Local, NaiveDate};

/// Source of "today" for the host environment.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Clock backed by the local system time.
pub fn system_clock() -> Clock {
    Arc::new(|| Local::now().date_naive())
}

/// Clock that always reports the same date.
pub fn fixed_clock(date: NaiveDate) -> Clock {
    Arc::new(move || date)
}

/// Calendar date split into its year, month and day fields.
///
/// Month and day are 1-based. The value is computed fresh for every use and
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Returns `None` when the fields do not name a real day.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// Reads today's date from the given clock.
    pub fn today(clock: &Clock) -> Self {
        Self::from(clock())
    }

    /// Renders the date as `YYYY-MM-DD`.
    ///
    /// The year is written as-is; month and day are padded to two digits.
    pub fn iso_text(&self) -> String {
        format!("{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_text())
    }
}
