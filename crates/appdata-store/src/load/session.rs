use appdata_core::Row;

use crate::errors::Result;

/// One exclusive conversation with the store
///
/// `begin` opens the transaction that `commit` or `rollback` ends. Statements
/// executed after the transaction ended run outside it. `release` gives the
/// underlying connection back and is called exactly once by the loader.
pub trait LoadSession {
    fn begin(&mut self) -> Result<()>;

    /// Execute a statement without binds, returning the rows affected
    fn execute(&mut self, sql: &str) -> Result<usize>;

    /// Execute `sql` once per row with the row's named binds, preparing it
    /// once; returns the total rows affected
    fn execute_many(&mut self, sql: &str, rows: &[Row]) -> Result<usize>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    fn release(&mut self) -> Result<()>;
}

/// Hands out sessions for a single load
pub trait SessionSource {
    type Session<'a>: LoadSession
    where
        Self: 'a;

    fn acquire(&mut self) -> Result<Self::Session<'_>>;
}
