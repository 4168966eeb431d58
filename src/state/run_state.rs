use crate::state::{ItemState, QuotaBreaker, RunPhase};

/// Counters and breaker for a single run
///
/// Owned by the crawl loop and handed by `&mut` to every step that can change
/// it. Nothing here is persisted; the ledger and the metadata store carry
/// everything a later run needs.
#[derive(Debug, Clone)]
pub struct RunState {
    /// Source items discovered by the scanner
    pub total: usize,

    /// Items skipped because the ledger already lists them
    pub skipped_by_ledger: usize,

    /// Identifiers skipped because their metadata is already on disk
    pub skipped_existing: usize,

    /// Metadata records written in this run
    pub saved: usize,

    /// Cover images written in this run
    pub covers_saved: usize,

    /// Identifiers the catalog had no volume for
    pub not_found: usize,

    /// Identifier attempts that failed for any non-quota reason
    pub identifier_errors: usize,

    /// Searches that failed for any non-quota reason
    pub search_errors: usize,

    /// Items recorded in the ledger during this run
    pub items_done: usize,

    /// Items left out of the ledger because the breaker tripped mid-item
    pub items_abandoned: usize,

    pub breaker: QuotaBreaker,

    phase: RunPhase,
}

impl RunState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            skipped_by_ledger: 0,
            skipped_existing: 0,
            saved: 0,
            covers_saved: 0,
            not_found: 0,
            identifier_errors: 0,
            search_errors: 0,
            items_done: 0,
            items_abandoned: 0,
            breaker: QuotaBreaker::new(),
            phase: RunPhase::Running,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Moves the run to its next phase
    ///
    /// Illegal transitions are logged and ignored.
    pub fn advance(&mut self, next: RunPhase) {
        if self.phase.can_transition_to(next) {
            self.phase = next;
        } else {
            tracing::warn!("Ignoring run phase transition {} -> {}", self.phase, next);
        }
    }

    /// Ends the running phase according to the breaker
    pub fn finish(&mut self) {
        let next = if self.breaker.is_tripped() {
            RunPhase::StoppedByQuota
        } else {
            RunPhase::Completed
        };
        self.advance(next);
    }

    /// Records the final state of an item
    pub fn record_item(&mut self, outcome: ItemState) {
        match outcome {
            ItemState::Done => self.items_done += 1,
            ItemState::Abandoned => self.items_abandoned += 1,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = RunState::new(5);
        assert_eq!(state.total, 5);
        assert_eq!(state.saved, 0);
        assert_eq!(state.phase(), RunPhase::Running);
        assert!(!state.breaker.is_tripped());
    }

    #[test]
    fn test_finish_completed() {
        let mut state = RunState::new(1);
        state.finish();
        assert_eq!(state.phase(), RunPhase::Completed);
    }

    #[test]
    fn test_finish_stopped_by_quota() {
        let mut state = RunState::new(1);
        state.breaker.trip(429);
        state.finish();
        assert_eq!(state.phase(), RunPhase::StoppedByQuota);
        state.advance(RunPhase::Reported);
        assert_eq!(state.phase(), RunPhase::Reported);
    }

    #[test]
    fn test_illegal_transition_ignored() {
        let mut state = RunState::new(1);
        state.advance(RunPhase::Reported);
        assert_eq!(state.phase(), RunPhase::Running);
    }

    #[test]
    fn test_record_item() {
        let mut state = RunState::new(2);
        state.record_item(ItemState::Done);
        state.record_item(ItemState::Abandoned);
        state.record_item(ItemState::Pending);
        assert_eq!(state.items_done, 1);
        assert_eq!(state.items_abandoned, 1);
    }
}
