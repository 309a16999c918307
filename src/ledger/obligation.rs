//! Eligible-day accrual and per-prayer debt totals.

use chrono::NaiveDate;

use super::{
    calendar::{add_years, diff_days, parse_calendar_date, start_of_today},
    prayer::PrayerMap,
};

pub const MAX_PERCENT: u8 = 100;

/// Days elapsed between the obligation start (`birth_date + start_age` years)
/// and `today`.
///
/// An unparsable birth date yields 0, as does a start date after `today`.
pub fn compute_eligible_days(birth_date: &str, start_age: u32, today: NaiveDate) -> u64 {
    let Some(birth) = parse_calendar_date(birth_date) else {
        tracing::debug!(birth_date, "birth date did not parse; no eligible days");
        return 0;
    };
    eligible_days_from(birth, start_age, today)
}

/// [`compute_eligible_days`] against the local calendar's current date.
pub fn compute_eligible_days_today(birth_date: &str, start_age: u32) -> u64 {
    compute_eligible_days(birth_date, start_age, start_of_today())
}

pub(crate) fn eligible_days_from(birth: NaiveDate, start_age: u32, today: NaiveDate) -> u64 {
    let years = i32::try_from(start_age).unwrap_or(i32::MAX);
    let start = add_years(birth, years);
    diff_days(today, start).max(0).unsigned_abs()
}

/// Debt per prayer: `ceil(eligible_days * percent / 100)` with each percent
/// clamped to `0..=100`. Rounds up so a stated percentage is never
/// under-counted.
pub fn compute_totals(eligible_days: u64, percent_missed: &PrayerMap<u8>) -> PrayerMap<u64> {
    percent_missed.map(|_, percent| {
        let percent = u64::from((*percent).min(MAX_PERCENT));
        eligible_days.saturating_mul(percent).div_ceil(100)
    })
}

/// Normalizes a raw percentage from form input: NaN becomes 0, fractions are
/// truncated toward zero, and the result is clamped to `0..=100`.
pub fn clamp_percent(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.trunc().clamp(0.0, f64::from(MAX_PERCENT)) as u8
}

/// Normalizes a raw start age: NaN and negatives become 0, fractions are
/// truncated toward zero.
pub fn clamp_start_age(raw: f64) -> u32 {
    if raw.is_nan() {
        return 0;
    }
    raw.trunc().clamp(0.0, f64::from(u32::MAX)) as u32
}
