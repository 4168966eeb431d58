/// Progress states for source items and for the run as a whole
use std::fmt;

/// State of a single source item within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemState {
    /// Discovered but not yet looked at
    Pending,

    /// Catalog search in flight
    Searching,

    /// Working through the identifiers the search returned
    Identifiers,

    /// Every identifier attempted; recorded in the ledger
    Done,

    /// Quota breaker tripped mid-item; left out of the ledger for the next run
    Abandoned,
}

impl ItemState {
    /// Checks whether moving to `next` is a legal transition
    pub fn can_transition_to(&self, next: ItemState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Searching)
                | (Self::Searching, Self::Identifiers)
                | (Self::Searching, Self::Abandoned)
                | (Self::Identifiers, Self::Done)
                | (Self::Identifiers, Self::Abandoned)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Searching => "searching",
            Self::Identifiers => "identifiers",
            Self::Done => "done",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phase of the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    Running,
    Completed,
    StoppedByQuota,
    Reported,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::StoppedByQuota => "stopped_by_quota",
            Self::Reported => "reported",
        }
    }

    /// Checks whether moving to `next` is a legal transition
    pub fn can_transition_to(&self, next: RunPhase) -> bool {
        matches!(
            (self, next),
            (Self::Running, Self::Completed)
                | (Self::Running, Self::StoppedByQuota)
                | (Self::Completed, Self::Reported)
                | (Self::StoppedByQuota, Self::Reported)
        )
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_happy_path() {
        assert!(ItemState::Pending.can_transition_to(ItemState::Searching));
        assert!(ItemState::Searching.can_transition_to(ItemState::Identifiers));
        assert!(ItemState::Identifiers.can_transition_to(ItemState::Done));
    }

    #[test]
    fn test_item_abandon_paths() {
        assert!(ItemState::Searching.can_transition_to(ItemState::Abandoned));
        assert!(ItemState::Identifiers.can_transition_to(ItemState::Abandoned));
        assert!(!ItemState::Pending.can_transition_to(ItemState::Abandoned));
    }

    #[test]
    fn test_item_no_shortcuts() {
        assert!(!ItemState::Pending.can_transition_to(ItemState::Done));
        assert!(!ItemState::Done.can_transition_to(ItemState::Searching));
        assert!(!ItemState::Abandoned.can_transition_to(ItemState::Done));
    }

    #[test]
    fn test_run_phases() {
        assert!(RunPhase::Running.can_transition_to(RunPhase::Completed));
        assert!(RunPhase::Running.can_transition_to(RunPhase::StoppedByQuota));
        assert!(RunPhase::Completed.can_transition_to(RunPhase::Reported));
        assert!(RunPhase::StoppedByQuota.can_transition_to(RunPhase::Reported));
        assert!(!RunPhase::Running.can_transition_to(RunPhase::Reported));
        assert!(!RunPhase::Reported.can_transition_to(RunPhase::Running));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ItemState::Abandoned), "abandoned");
        assert_eq!(format!("{}", RunPhase::StoppedByQuota), "stopped_by_quota");
    }
}
