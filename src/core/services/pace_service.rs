//! Completion forecasts from a pledged daily make-up pace.

use chrono::NaiveDate;

use super::sync_service::parse_digits;
use crate::ledger::{add_days, diff_days, Prayer, PrayerMap};

/// Daily make-up pledge per prayer; 0 means nothing pledged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacePlan {
    pub per_day: PrayerMap<u32>,
}

impl PacePlan {
    pub fn new(per_day: PrayerMap<u32>) -> Self {
        Self { per_day }
    }

    pub fn one_each() -> Self {
        Self::new(PrayerMap::splat(1))
    }

    pub fn zero_all() -> Self {
        Self::default()
    }

    /// Updates one prayer from raw text input.
    pub fn set_text(&mut self, prayer: Prayer, text: &str) {
        self.per_day[prayer] = parse_pace_text(text);
    }
}

/// Parses a pace field: non-digits are dropped and blank means 0.
pub fn parse_pace_text(text: &str) -> u32 {
    parse_digits(text)
        .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysToZero {
    Days(u64),
    /// Debt remains but no pace was pledged.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaceOutcome {
    /// At least one prayer has debt and a zero pace; the pace must increase
    /// before a finish date exists.
    Unreachable { blocked: Vec<Prayer> },
    /// Nothing remains anywhere.
    Complete,
    OnTrack {
        days_needed: u64,
        limiting: Prayer,
        finish_date: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaceProjection {
    pub days_for: PrayerMap<DaysToZero>,
    pub outcome: PaceOutcome,
}

impl PaceProjection {
    pub fn days_needed(&self) -> Option<u64> {
        match self.outcome {
            PaceOutcome::Unreachable { .. } => None,
            PaceOutcome::Complete => Some(0),
            PaceOutcome::OnTrack { days_needed, .. } => Some(days_needed),
        }
    }

    pub fn finish_date(&self) -> Option<NaiveDate> {
        match self.outcome {
            PaceOutcome::OnTrack { finish_date, .. } => Some(finish_date),
            _ => None,
        }
    }

    pub fn limiting(&self) -> Option<Prayer> {
        match self.outcome {
            PaceOutcome::OnTrack { limiting, .. } => Some(limiting),
            _ => None,
        }
    }
}

/// Forecasts when `remaining` reaches zero everywhere at `pace` per day.
///
/// The limiting prayer is the first, in canonical order, whose days-to-zero
/// equals the maximum.
pub fn project_pace(
    remaining: &PrayerMap<u64>,
    pace: &PacePlan,
    today: NaiveDate,
) -> PaceProjection {
    let days_for = remaining.map(|prayer, remaining| {
        let per_day = u64::from(pace.per_day[prayer]);
        match (*remaining, per_day) {
            (0, _) => DaysToZero::Days(0),
            (_, 0) => DaysToZero::Blocked,
            (remaining, per_day) => DaysToZero::Days(remaining.div_ceil(per_day)),
        }
    });

    let blocked: Vec<Prayer> = days_for
        .iter()
        .filter(|(_, days)| **days == DaysToZero::Blocked)
        .map(|(prayer, _)| prayer)
        .collect();
    if !blocked.is_empty() {
        return PaceProjection {
            days_for,
            outcome: PaceOutcome::Unreachable { blocked },
        };
    }

    let mut slowest: Option<(Prayer, u64)> = None;
    for (prayer, days) in days_for.iter() {
        if let DaysToZero::Days(days) = *days {
            if days > slowest.map_or(0, |(_, max)| max) {
                slowest = Some((prayer, days));
            }
        }
    }

    let outcome = match slowest {
        None => PaceOutcome::Complete,
        Some((limiting, days_needed)) => PaceOutcome::OnTrack {
            days_needed,
            limiting,
            finish_date: add_days(today, i64::try_from(days_needed).unwrap_or(i64::MAX)),
        },
    };
    PaceProjection { days_for, outcome }
}

/// Minimum daily pace per prayer that clears `remaining` by `goal`.
///
/// `None` when `goal` is not after `today`.
pub fn required_pace(
    remaining: &PrayerMap<u64>,
    today: NaiveDate,
    goal: NaiveDate,
) -> Option<PrayerMap<u64>> {
    let days = u64::try_from(diff_days(goal, today)).ok().filter(|days| *days > 0)?;
    Some(remaining.map(|_, remaining| remaining.div_ceil(days)))
}
