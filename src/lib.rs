#![doc(test(attr(deny(warnings))))]

//! Qada Core tracks missed-prayer debt: eligible-day accrual from a birth
//! date and start age, per-prayer totals, a mutable remaining ledger, and
//! pace-based completion forecasts.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::services::{
    apply_delta, count_to_percent, create_initial_ledger, percent_to_count, project_pace,
};
pub use crate::ledger::{compute_eligible_days, compute_totals, Ledger, Prayer, PrayerMap};

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    utils::init_tracing();
    tracing::debug!("Qada Core tracing initialized.");
}
