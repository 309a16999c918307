//! Ledger construction and mutation entry points.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    errors::Result,
    ledger::{Ledger, Prayer, SetupInput},
};

/// Validates setup input and builds the initial ledger as of `today`.
pub fn create_initial_ledger(
    input: &SetupInput,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Ledger> {
    let ledger = Ledger::create(input, today, now)?;
    tracing::info!(
        eligible_days = ledger.eligible_days,
        total_debt = ledger.total_debt(),
        "initial ledger created"
    );
    Ok(ledger)
}

/// Returns a new ledger with `delta` applied to `prayer`, clamped at zero.
pub fn apply_delta(ledger: &Ledger, prayer: Prayer, delta: i64, now: DateTime<Utc>) -> Ledger {
    let next = ledger.with_delta(prayer, delta, now);
    tracing::debug!(
        %prayer,
        delta,
        remaining = next.remaining[prayer],
        "delta applied"
    );
    next
}
