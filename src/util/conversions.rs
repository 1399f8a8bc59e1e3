//! Duration conversions between total minutes and days/hours/minutes.

#[cfg(test)]
#[path = "conversions_test.rs"]
mod conversions_test;

use crate::net::types::DaysHoursMinutes;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Collapse a days/hours/minutes triple into total minutes. Components are
/// not required to be normalized: `{ hours: 25 }` is 1500 minutes. Totals
/// outside the `i64` range saturate.
#[must_use]
pub fn days_hours_minutes_to_minutes(value: DaysHoursMinutes) -> i64 {
    let total = i128::from(value.days) * i128::from(MINUTES_PER_DAY)
        + i128::from(value.hours) * i128::from(MINUTES_PER_HOUR)
        + i128::from(value.minutes);
    i64::try_from(total).unwrap_or(if total.is_negative() { i64::MIN } else { i64::MAX })
}

/// Split total minutes into whole days, hours (0..24) and minutes (0..60).
///
/// Uses floor division, so the result is the exact inverse of
/// [`days_hours_minutes_to_minutes`] for every input.
#[must_use]
pub fn minutes_to_days_hours_minutes(minutes: i64) -> DaysHoursMinutes {
    DaysHoursMinutes {
        days: minutes.div_euclid(MINUTES_PER_DAY),
        hours: minutes.rem_euclid(MINUTES_PER_DAY) / MINUTES_PER_HOUR,
        minutes: minutes.rem_euclid(MINUTES_PER_HOUR),
    }
}
