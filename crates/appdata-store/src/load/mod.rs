//! Full-replace loader
//!
//! Executes a [`LoadPlan`](appdata_core::LoadPlan) against a store as one
//! transaction: preload, children-first deletes, parents-first bulk inserts,
//! commit, postload. The store is reached only through [`LoadSession`], so the
//! protocol runs unchanged against SQLite or a recording test double.

mod protocol;
mod session;
pub mod sqlite;
mod state;
mod stats;

use serde::{Deserialize, Serialize};

pub use protocol::load;
pub use session::{LoadSession, SessionSource};
pub use sqlite::SqliteSession;
pub use state::LoadState;
pub use stats::{LoadStats, PhaseStat, TableStats};

/// Loader behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    /// After a rollback, run the plan's restore statements so trigger and
    /// constraint suspensions that outlive a rollback are undone. Identity
    /// sequences are never re-anchored on this path.
    pub restore_on_failure: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            restore_on_failure: true,
        }
    }
}
