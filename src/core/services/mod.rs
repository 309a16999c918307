pub mod ledger_service;
pub mod pace_service;
pub mod progress_service;
pub mod sync_service;

pub use ledger_service::{apply_delta, create_initial_ledger};
pub use pace_service::{
    parse_pace_text, project_pace, required_pace, DaysToZero, PaceOutcome, PacePlan,
    PaceProjection,
};
pub use progress_service::{pending_milestones, PrayerProgress, ProgressSummary};
pub use sync_service::{count_to_percent, percent_to_count, SetupDraft, SyncField};
