//! APOD date range handling.

use chrono::{Datelike, NaiveDate};

use crate::error::AppError;

/// The first day with an Astronomy Picture of the Day.
pub fn apod_epoch() -> NaiveDate {
    // 1995-06-16 is a valid calendar date
    NaiveDate::from_ymd_opt(1995, 6, 16).unwrap_or(NaiveDate::MIN)
}

/// Check that `start..=end` is a range the API can answer.
///
/// Both dates must lie within `[epoch, today]` and `start` must not come
/// after `end`.
pub fn validate_range(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    let earliest = apod_epoch();
    for (field, date) in [("start_date", start), ("end_date", end)] {
        if date < earliest || date > today {
            return Err(AppError::DateOutOfRange {
                field,
                date,
                earliest,
                latest: today,
            });
        }
    }

    if start > end {
        return Err(AppError::InvertedRange { start, end });
    }
    Ok(())
}

/// Range covering `year`, clipped to the epoch and to today.
///
/// Returns `None` when the year has no APOD days yet (or any more).
pub fn year_range(year: i32, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?.max(apod_epoch());
    let last = NaiveDate::from_ymd_opt(year, 12, 31)?.min(today);
    if first > last || first.year() != year {
        return None;
    }
    Some((first, last))
}

/// Number of days in the inclusive range.
pub fn day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
