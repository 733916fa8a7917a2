use std::collections::BTreeMap;
use std::time::Instant;

use appdata_core::Table;
use serde::Serialize;

/// Rows affected and wall-clock time of one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseStat {
    pub rows_affected: usize,
    pub duration_ms: u64,
}

impl PhaseStat {
    pub(crate) fn since(started: Instant, rows_affected: usize) -> Self {
        Self {
            rows_affected,
            duration_ms: elapsed_ms(started),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub delete: PhaseStat,
    /// Zero rows and zero time when the batch was empty and skipped
    pub insert: PhaseStat,
}

/// Per-phase statistics of one load, keyed by logical table name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStats {
    pub preload: PhaseStat,
    pub tables: BTreeMap<Table, TableStats>,
    pub commit: PhaseStat,
    pub postload: PhaseStat,
    pub total_ms: u64,
}

impl LoadStats {
    pub fn inserted(&self, table: Table) -> usize {
        self.tables.get(&table).map_or(0, |t| t.insert.rows_affected)
    }

    pub fn deleted(&self, table: Table) -> usize {
        self.tables.get(&table).map_or(0, |t| t.delete.rows_affected)
    }

    pub fn total_inserted(&self) -> usize {
        self.tables.values().map(|t| t.insert.rows_affected).sum()
    }
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
