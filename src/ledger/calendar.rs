//! Calendar-day arithmetic on the device's local calendar.
//!
//! Every value is a [`NaiveDate`]: a date with no time component, so "local
//! midnight" is implicit and day differences never see DST shifts.

use chrono::{Datelike, Days, Local, NaiveDate};

/// Parses a `YYYY-MM-DD` string.
///
/// Returns `None` unless the input has exactly three numeric components, the
/// month is in `1..=12`, the day is in `1..=31`, and the triple names a real
/// calendar day. Overflowing dates such as `2023-02-30` are rejected rather
/// than normalized.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('-').map(str::trim).collect();
    let [year, month, day] = parts.as_slice() else {
        return None;
    };
    let year: i32 = numeric(year)?.parse().ok()?;
    let month: u32 = numeric(month)?.parse().ok()?;
    let day: u32 = numeric(day)?.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn numeric(part: &str) -> Option<&str> {
    if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
        Some(part)
    } else {
        None
    }
}

/// Formats a date as zero-padded `YYYY-MM-DD`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Shifts `date` by `years` whole calendar years.
///
/// When the day does not exist in the target month (Feb 29 on a non-leap
/// year) the surplus days roll into the following month, so Feb 29 becomes
/// Mar 1.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year().saturating_add(years);
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| {
            NaiveDate::from_ymd_opt(year, date.month(), 1)?
                .checked_add_days(Days::new(u64::from(date.day() - 1)))
        })
        .unwrap_or(if years >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        })
}

/// Shifts `date` by `days` whole days, saturating at the calendar bounds.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(if days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Today's date on the device's local calendar.
pub fn start_of_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `b` to `a`; negative when `a` precedes `b`.
pub fn diff_days(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_well_formed_dates() {
        assert_eq!(parse_calendar_date("2000-01-01"), Some(ymd(2000, 1, 1)));
        assert_eq!(parse_calendar_date("2024-02-29"), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn rejects_calendar_overflow() {
        assert_eq!(parse_calendar_date("2023-02-30"), None);
        assert_eq!(parse_calendar_date("2023-02-29"), None);
        assert_eq!(parse_calendar_date("2023-04-31"), None);
    }

    #[test]
    fn rejects_malformed_input() {
        for input in [
            "", "2023", "2023-01", "2023-01-01-01", "2023-13-01", "2023-00-10", "2023-01-00",
            "2023-01-32", "abcd-01-01", "2023-1a-01", "2023--01",
        ] {
            assert_eq!(parse_calendar_date(input), None, "accepted `{input}`");
        }
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_calendar_date(ymd(987, 3, 4)), "0987-03-04");
        assert_eq!(format_calendar_date(ymd(2012, 11, 30)), "2012-11-30");
    }

    #[test]
    fn add_years_keeps_month_and_day() {
        assert_eq!(add_years(ymd(2000, 1, 1), 12), ymd(2012, 1, 1));
        assert_eq!(add_years(ymd(2004, 2, 29), 4), ymd(2008, 2, 29));
    }

    #[test]
    fn add_years_rolls_leap_day_forward() {
        assert_eq!(add_years(ymd(2004, 2, 29), 1), ymd(2005, 3, 1));
    }

    #[test]
    fn diff_days_is_signed() {
        assert_eq!(diff_days(ymd(2024, 1, 1), ymd(2012, 1, 1)), 4383);
        assert_eq!(diff_days(ymd(2012, 1, 1), ymd(2012, 1, 8)), -7);
        assert_eq!(diff_days(ymd(2012, 1, 1), ymd(2012, 1, 1)), 0);
    }

    #[test]
    fn add_days_crosses_month_and_year() {
        assert_eq!(add_days(ymd(2024, 12, 30), 5), ymd(2025, 1, 4));
        assert_eq!(add_days(ymd(2024, 3, 1), -1), ymd(2024, 2, 29));
    }
}
