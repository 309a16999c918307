use chrono::NaiveDate;

use crate::core::clock::Clock;
use crate::core::services::{
    ledger_service, pace_service::project_pace, PacePlan, PaceProjection, ProgressSummary,
};
use crate::errors::Result;
use crate::ledger::{Ledger, Milestone, Prayer, SetupInput};
use crate::storage::LedgerStore;

/// Owns the authoritative ledger snapshot and notifies the store after every
/// accepted change.
///
/// Changes are applied in memory first. Store failures are logged and
/// swallowed, so the in-memory ledger and the durable copy may diverge until
/// the next successful save.
pub struct LedgerManager {
    current: Option<Ledger>,
    store: Box<dyn LedgerStore>,
    clock: Box<dyn Clock>,
}

impl LedgerManager {
    /// Creates a manager with no ledger loaded.
    pub fn new(store: Box<dyn LedgerStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            current: None,
            store,
            clock,
        }
    }

    /// Creates a manager and loads whatever the store holds. A failed or
    /// unreadable load leaves the manager without a ledger.
    pub fn open(store: Box<dyn LedgerStore>, clock: Box<dyn Clock>) -> Self {
        let mut manager = Self::new(store, clock);
        manager.current = match manager.store.load() {
            Ok(ledger) => ledger,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load ledger; starting without one");
                None
            }
        };
        manager
    }

    pub fn get(&self) -> Option<&Ledger> {
        self.current.as_ref()
    }

    pub fn is_set_up(&self) -> bool {
        self.current.is_some()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Builds the initial ledger from setup input, replacing any current one.
    pub fn create(&mut self, input: &SetupInput) -> Result<&Ledger> {
        let ledger =
            ledger_service::create_initial_ledger(input, self.clock.today(), self.clock.now())?;
        Ok(self.commit(ledger))
    }

    /// Applies `transform` to the current ledger.
    ///
    /// Setup-time fields (birth date, start age, percentages, eligible days,
    /// totals, creation time) are carried over from the current ledger and
    /// `updated_at` is refreshed. Returns `None` when no ledger exists.
    pub fn mutate<F>(&mut self, transform: F) -> Option<&Ledger>
    where
        F: FnOnce(&Ledger) -> Ledger,
    {
        let now = self.clock.now();
        let current = self.current.as_ref()?;
        let mut next = transform(current);
        next.birth_date = current.birth_date;
        next.start_age = current.start_age;
        next.percent_missed = current.percent_missed;
        next.eligible_days = current.eligible_days;
        next.totals = current.totals;
        next.created_at = current.created_at;
        next.updated_at = current.updated_at;
        next.schema_version = current.schema_version;
        next.touch(now);
        Some(self.commit(next))
    }

    /// Adds `delta` to one prayer's remaining count, clamping at zero.
    pub fn apply_delta(&mut self, prayer: Prayer, delta: i64) -> Option<&Ledger> {
        let now = self.clock.now();
        let next = ledger_service::apply_delta(self.current.as_ref()?, prayer, delta, now);
        Some(self.commit(next))
    }

    pub fn set_goal_date(&mut self, goal: Option<NaiveDate>) -> Option<&Ledger> {
        self.mutate(|ledger| Ledger {
            goal_date: goal,
            ..ledger.clone()
        })
    }

    pub fn mark_milestones_seen(&mut self, milestones: &[Milestone]) -> Option<&Ledger> {
        self.mutate(|ledger| {
            let mut next = ledger.clone();
            next.milestones_seen.extend(milestones.iter().copied());
            next
        })
    }

    pub fn progress(&self) -> Option<ProgressSummary> {
        self.get().map(ProgressSummary::of)
    }

    pub fn project_pace(&self, plan: &PacePlan) -> Option<PaceProjection> {
        self.get()
            .map(|ledger| project_pace(&ledger.remaining, plan, self.clock.today()))
    }

    /// Discards the ledger and asks the store to forget it.
    pub fn reset(&mut self) {
        self.current = None;
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "failed to clear stored ledger");
        }
        tracing::info!("ledger reset");
    }

    fn commit(&mut self, ledger: Ledger) -> &Ledger {
        if let Err(err) = self.store.save(&ledger) {
            tracing::warn!(error = %err, "failed to persist ledger; keeping in-memory state");
        }
        self.current.insert(ledger)
    }
}
