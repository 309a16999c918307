use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    calendar::parse_calendar_date,
    milestone::Milestone,
    obligation::{clamp_percent, clamp_start_age, compute_totals, eligible_days_from},
    prayer::{Prayer, PrayerMap},
};
use crate::errors::{QadaError, Result};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The persisted missed-prayer ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(with = "ymd")]
    pub birth_date: NaiveDate,
    pub start_age: u32,
    pub percent_missed: PrayerMap<u8>,
    pub eligible_days: u64,
    pub totals: PrayerMap<u64>,
    pub remaining: PrayerMap<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "ymd_opt")]
    pub goal_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub milestones_seen: BTreeSet<Milestone>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: u8,
}

/// Raw setup form values, before clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupInput {
    pub birth_date: String,
    pub start_age: f64,
    pub percent_missed: PrayerMap<f64>,
}

impl Ledger {
    /// Builds the initial ledger from setup input.
    ///
    /// Fails with [`QadaError::InvalidDate`] when the birth date does not
    /// parse and with [`QadaError::NoEligibleDays`] when the obligation has
    /// not started as of `today`.
    pub fn create(input: &SetupInput, today: NaiveDate, now: DateTime<Utc>) -> Result<Self> {
        let birth_date = parse_calendar_date(&input.birth_date)
            .ok_or_else(|| QadaError::InvalidDate(input.birth_date.clone()))?;
        let start_age = clamp_start_age(input.start_age);
        let percent_missed = input.percent_missed.map(|_, raw| clamp_percent(*raw));

        let eligible_days = eligible_days_from(birth_date, start_age, today);
        if eligible_days == 0 {
            return Err(QadaError::NoEligibleDays);
        }

        let totals = compute_totals(eligible_days, &percent_missed);
        Ok(Self {
            birth_date,
            start_age,
            percent_missed,
            eligible_days,
            totals,
            remaining: totals,
            goal_date: None,
            milestones_seen: BTreeSet::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        })
    }

    /// Returns a copy with `delta` applied to one prayer's remaining count.
    ///
    /// The count saturates at zero; there is no upper bound, so debt can be
    /// added back beyond the original total.
    pub fn with_delta(&self, prayer: Prayer, delta: i64, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        let current = next.remaining[prayer];
        next.remaining[prayer] = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs())
        } else {
            current.saturating_sub(delta.unsigned_abs())
        };
        next.touch(now);
        next
    }

    pub fn total_remaining(&self) -> u64 {
        self.remaining.sum()
    }

    pub fn total_debt(&self) -> u64 {
        self.totals.sum()
    }

    /// Refreshes `updated_at` without ever moving it backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }
}

mod ymd {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::ledger::calendar::{format_calendar_date, parse_calendar_date};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_calendar_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid calendar date `{raw}`")))
    }
}

mod ymd_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::ymd::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        #[derive(serde::Deserialize)]
        struct Wrapped(#[serde(with = "super::ymd")] NaiveDate);

        let wrapped: Option<Wrapped> = Option::deserialize(deserializer)?;
        Ok(wrapped.map(|Wrapped(date)| date))
    }
}
