//! Calendar-day grouping of timestamped itinerary items.
//!
//! Days are computed in a fixed UTC offset configured per deployment, so an
//! activity at 23:30 UTC can land on the next day for a `+01:00` server.

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Largest accepted offset magnitude, in minutes (UTC-14:00 .. UTC+14:00).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Build the itinerary time zone from an offset in minutes east of UTC.
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, CoreError> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(CoreError::Validation(format!(
            "UTC offset must be within +/-{MAX_OFFSET_MINUTES} minutes, got {minutes}"
        )));
    }
    FixedOffset::east_opt(minutes * 60)
        .ok_or_else(|| CoreError::Validation(format!("invalid UTC offset: {minutes} minutes")))
}

/// The calendar day `at` falls on in `offset`.
pub fn calendar_day(at: &Timestamp, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

/// Group `items` by the calendar day of `occurs_at(item)`.
///
/// Groups come back in ascending date order. Items within a group keep
/// their input order.
pub fn group_by_day<T, F>(items: Vec<T>, offset: FixedOffset, occurs_at: F) -> Vec<(NaiveDate, Vec<T>)>
where
    F: Fn(&T) -> Timestamp,
{
    let mut days: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for item in items {
        let day = calendar_day(&occurs_at(&item), offset);
        days.entry(day).or_default().push(item);
    }
    days.into_iter().collect()
}
