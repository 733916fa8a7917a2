use std::fmt;

/// Where a load is in its protocol
///
/// ```text
/// Idle -> Connected -> PreloadApplied -> Deleted -> Inserted -> Committed
///      -> PostloadApplied -> Released
/// any pre-commit state -> Aborting -> RolledBack -> Released
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Connected,
    PreloadApplied,
    Deleted,
    Inserted,
    Committed,
    PostloadApplied,
    Aborting,
    RolledBack,
    Released,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Connected => "connected",
            LoadState::PreloadApplied => "preload_applied",
            LoadState::Deleted => "deleted",
            LoadState::Inserted => "inserted",
            LoadState::Committed => "committed",
            LoadState::PostloadApplied => "postload_applied",
            LoadState::Aborting => "aborting",
            LoadState::RolledBack => "rolled_back",
            LoadState::Released => "released",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Released)
    }

    /// True once row data is durable
    pub fn is_committed(&self) -> bool {
        matches!(self, LoadState::Committed | LoadState::PostloadApplied)
    }

    pub fn can_transition_to(&self, next: LoadState) -> bool {
        use LoadState::*;
        matches!(
            (self, next),
            (Idle, Connected)
                | (Connected, PreloadApplied)
                | (PreloadApplied, Deleted)
                | (Deleted, Inserted)
                | (Inserted, Committed)
                | (Committed, PostloadApplied)
                | (Connected | PreloadApplied | Deleted | Inserted, Aborting)
                | (Aborting, RolledBack)
                // begin failed: nothing to roll back
                | (Connected, Released)
                // rollback failed
                | (Aborting, Released)
                // postload failed
                | (Committed, Released)
                | (PostloadApplied | RolledBack, Released)
        )
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current state of one load, logging every transition
#[derive(Debug)]
pub(crate) struct StateTracker {
    state: LoadState,
}

impl StateTracker {
    pub(crate) fn new() -> Self {
        Self {
            state: LoadState::Idle,
        }
    }

    pub(crate) fn current(&self) -> LoadState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: LoadState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal load transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(
            event = appdata_core_types::schema::EVENT_TRANSITION,
            from = self.state.as_str(),
            to = next.as_str(),
            "Load state transition"
        );
        self.state = next;
    }
}
