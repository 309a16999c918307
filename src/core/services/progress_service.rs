use chrono::{DateTime, Utc};

use crate::ledger::{Ledger, Milestone, Prayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerProgress {
    pub prayer: Prayer,
    pub remaining: u64,
    pub total: u64,
    pub percent_missed: u8,
}

/// Read-only snapshot of how far the ledger has been paid down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub per_prayer: Vec<PrayerProgress>,
    pub eligible_days: u64,
    pub total_remaining: u64,
    pub total_debt: u64,
    pub completed: u64,
    pub updated_at: DateTime<Utc>,
}

impl ProgressSummary {
    pub fn of(ledger: &Ledger) -> Self {
        let per_prayer = Prayer::ALL
            .into_iter()
            .map(|prayer| PrayerProgress {
                prayer,
                remaining: ledger.remaining[prayer],
                total: ledger.totals[prayer],
                percent_missed: ledger.percent_missed[prayer],
            })
            .collect();
        let total_remaining = ledger.total_remaining();
        let total_debt = ledger.total_debt();
        Self {
            per_prayer,
            eligible_days: ledger.eligible_days,
            total_remaining,
            total_debt,
            completed: total_debt.saturating_sub(total_remaining),
            updated_at: ledger.updated_at,
        }
    }
}

/// Milestones the ledger has reached but not yet announced, in threshold
/// order.
pub fn pending_milestones(ledger: &Ledger) -> Vec<Milestone> {
    let remaining = ledger.total_remaining();
    let total = ledger.total_debt();
    Milestone::ALL
        .into_iter()
        .filter(|milestone| milestone.is_reached(remaining, total))
        .filter(|milestone| !ledger.milestones_seen.contains(milestone))
        .collect()
}
