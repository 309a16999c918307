//! Percent/count synchronization for the setup form.
//!
//! A user may enter either the share of eligible days missed or an absolute
//! count per prayer. The field edited last is authoritative: its value is
//! clamped first and the other field is recomputed from the clamped value, so
//! both stay consistent on every keystroke.

use chrono::NaiveDate;

use crate::ledger::{
    obligation::{compute_eligible_days, MAX_PERCENT},
    Prayer, PrayerMap, SetupInput,
};

/// Count closest to `percent` of `eligible_days`, rounding half up and
/// clamped to `0..=eligible_days`.
pub fn percent_to_count(percent: i64, eligible_days: u64) -> u64 {
    let percent = percent.clamp(0, i64::from(MAX_PERCENT)).unsigned_abs();
    let count = (u128::from(eligible_days) * u128::from(percent) + 50) / 100;
    u64::try_from(count).unwrap_or(u64::MAX).min(eligible_days)
}

/// Percentage of `eligible_days` represented by `count`, rounding half up.
/// Always 0 when there are no eligible days.
pub fn count_to_percent(count: i64, eligible_days: u64) -> u8 {
    if eligible_days == 0 {
        return 0;
    }
    let count = count.max(0).unsigned_abs().min(eligible_days);
    let days = u128::from(eligible_days);
    let percent = (u128::from(count) * 200 + days) / (2 * days);
    percent.min(u128::from(MAX_PERCENT)) as u8
}

/// Paired percent/count inputs for one prayer. `None` means the field is
/// blank, which renders empty and counts as 0 toward totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncField {
    pub percent: Option<u8>,
    pub count: Option<u64>,
}

impl SyncField {
    pub fn is_unset(&self) -> bool {
        self.percent.is_none() && self.count.is_none()
    }
}

/// In-progress setup form.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupDraft {
    pub birth_date: String,
    pub start_age: u32,
    pub fields: PrayerMap<SyncField>,
}

impl SetupDraft {
    pub fn new(default_start_age: u32) -> Self {
        Self {
            birth_date: String::new(),
            start_age: default_start_age,
            fields: PrayerMap::default(),
        }
    }

    /// Eligible days implied by the draft's current birth date and start age.
    pub fn eligible_days(&self, today: NaiveDate) -> u64 {
        compute_eligible_days(&self.birth_date, self.start_age, today)
    }

    pub fn field(&self, prayer: Prayer) -> SyncField {
        self.fields[prayer]
    }

    /// Applies a keystroke to the percent field of `prayer`.
    pub fn edit_percent(&mut self, prayer: Prayer, text: &str, today: NaiveDate) -> SyncField {
        let field = match parse_digits(text) {
            None => SyncField::default(),
            Some(value) => {
                let percent = value.min(u64::from(MAX_PERCENT)) as u8;
                SyncField {
                    percent: Some(percent),
                    count: Some(percent_to_count(i64::from(percent), self.eligible_days(today))),
                }
            }
        };
        self.fields[prayer] = field;
        field
    }

    /// Applies a keystroke to the count field of `prayer`.
    pub fn edit_count(&mut self, prayer: Prayer, text: &str, today: NaiveDate) -> SyncField {
        let field = match parse_digits(text) {
            None => SyncField::default(),
            Some(value) => {
                let days = self.eligible_days(today);
                let count = value.min(days);
                SyncField {
                    percent: Some(count_to_percent(
                        i64::try_from(count).unwrap_or(i64::MAX),
                        days,
                    )),
                    count: Some(count),
                }
            }
        };
        self.fields[prayer] = field;
        field
    }

    pub fn set_birth_date(&mut self, text: impl Into<String>, today: NaiveDate) {
        self.birth_date = text.into();
        self.resync_counts(today);
    }

    pub fn set_start_age(&mut self, start_age: u32, today: NaiveDate) {
        self.start_age = start_age;
        self.resync_counts(today);
    }

    /// Percent stays authoritative when the eligible-day count moves.
    fn resync_counts(&mut self, today: NaiveDate) {
        let days = self.eligible_days(today);
        for prayer in Prayer::ALL {
            let field = &mut self.fields[prayer];
            if let Some(percent) = field.percent {
                field.count = Some(percent_to_count(i64::from(percent), days));
            }
        }
    }

    /// Committed percentages; blank fields contribute 0.
    pub fn percent_map(&self) -> PrayerMap<u8> {
        self.fields.map(|_, field| field.percent.unwrap_or(0))
    }

    pub fn to_input(&self) -> SetupInput {
        SetupInput {
            birth_date: self.birth_date.trim().to_string(),
            start_age: f64::from(self.start_age),
            percent_missed: self.percent_map().map(|_, percent| f64::from(*percent)),
        }
    }
}

/// Keeps only ASCII digits; `None` when nothing numeric remains. Values past
/// `u64::MAX` saturate.
pub(crate) fn parse_digits(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn draft() -> SetupDraft {
        let mut draft = SetupDraft::new(12);
        draft.set_birth_date("2000-01-01", today());
        draft
    }

    #[test]
    fn percent_to_count_rounds_to_nearest() {
        assert_eq!(percent_to_count(40, 4383), 1753);
        assert_eq!(percent_to_count(50, 3), 2);
        assert_eq!(percent_to_count(33, 3), 1);
        assert_eq!(percent_to_count(150, 10), 10);
        assert_eq!(percent_to_count(-4, 10), 0);
        assert_eq!(percent_to_count(70, 0), 0);
    }

    #[test]
    fn count_to_percent_rounds_and_clamps() {
        assert_eq!(count_to_percent(1, 3), 33);
        assert_eq!(count_to_percent(1, 200), 1);
        assert_eq!(count_to_percent(1, 201), 0);
        assert_eq!(count_to_percent(5_000, 4383), 100);
        assert_eq!(count_to_percent(-3, 4383), 0);
        assert_eq!(count_to_percent(12, 0), 0);
    }

    #[test]
    fn editing_percent_updates_count() {
        let mut draft = draft();
        let field = draft.edit_percent(Prayer::Fajr, "40", today());
        assert_eq!(field.percent, Some(40));
        assert_eq!(field.count, Some(1753));
    }

    #[test]
    fn editing_count_clamps_then_derives_percent() {
        let mut draft = draft();
        let field = draft.edit_count(Prayer::Asr, "99999", today());
        assert_eq!(field.count, Some(4383));
        assert_eq!(field.percent, Some(100));
    }

    #[test]
    fn percent_edit_strips_non_digits_and_clamps() {
        let mut draft = draft();
        let field = draft.edit_percent(Prayer::Isha, "1a5%0", today());
        assert_eq!(field.percent, Some(100));
        assert_eq!(field.count, Some(4383));
    }

    #[test]
    fn blank_edit_unsets_both_fields() {
        let mut draft = draft();
        draft.edit_percent(Prayer::Witr, "25", today());
        let field = draft.edit_count(Prayer::Witr, "", today());
        assert!(field.is_unset());
        assert_eq!(draft.percent_map()[Prayer::Witr], 0);
    }

    #[test]
    fn birth_date_change_recomputes_counts_from_percent() {
        let mut draft = draft();
        draft.edit_percent(Prayer::Dhuhr, "50", today());
        draft.set_birth_date("2010-01-01", today());
        assert_eq!(draft.eligible_days(today()), 730);
        assert_eq!(draft.field(Prayer::Dhuhr).count, Some(365));
        assert_eq!(draft.field(Prayer::Dhuhr).percent, Some(50));
        assert!(draft.field(Prayer::Fajr).is_unset());
    }

    #[test]
    fn invalid_birth_date_zeroes_counts() {
        let mut draft = draft();
        draft.edit_percent(Prayer::Maghrib, "20", today());
        draft.set_birth_date("2000-02-31", today());
        assert_eq!(draft.field(Prayer::Maghrib).count, Some(0));
        let field = draft.edit_count(Prayer::Maghrib, "10", today());
        assert_eq!(field, SyncField { percent: Some(0), count: Some(0) });
    }

    #[test]
    fn draft_converts_to_setup_input() {
        let mut draft = draft();
        draft.edit_percent(Prayer::Fajr, "40", today());
        let input = draft.to_input();
        assert_eq!(input.birth_date, "2000-01-01");
        assert_eq!(input.start_age, 12.0);
        assert_eq!(input.percent_missed[Prayer::Fajr], 40.0);
        assert_eq!(input.percent_missed[Prayer::Asr], 0.0);
    }
}
