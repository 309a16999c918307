//! Ledger domain model, calendar arithmetic, and debt calculations.

pub mod calendar;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod milestone;
pub mod obligation;
pub mod prayer;

pub use calendar::{
    add_days, add_years, diff_days, format_calendar_date, parse_calendar_date, start_of_today,
};
pub use ledger::{Ledger, SetupInput, CURRENT_SCHEMA_VERSION};
pub use milestone::Milestone;
pub use obligation::{compute_eligible_days, compute_eligible_days_today, compute_totals};
pub use prayer::{Prayer, PrayerMap};
