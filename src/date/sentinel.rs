use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Calendar days that tools write when they have no date: the Unix epoch
/// and the classic Mac/QuickTime epoch.
const SENTINEL_DAYS: [(i32, u32, u32); 2] = [(1970, 1, 1), (1904, 1, 1)];

pub fn is_sentinel_day(date: NaiveDate) -> bool {
    SENTINEL_DAYS
        .iter()
        .any(|&(y, m, d)| date.year() == y && date.month() == m && date.day() == d)
}

/// A candidate is valid unless it falls on a sentinel day, whatever its time of day.
pub fn is_valid(date: &NaiveDateTime) -> bool {
    !is_sentinel_day(date.date())
}
