use std::ops::{Deref, DerefMut};
use std::time::Instant;

use appdata_core::errors::{ExError, ExErrorKind};
use appdata_core::{LoadPlan, TableLoad};

use super::session::{LoadSession, SessionSource};
use super::state::{LoadState, StateTracker};
use super::stats::{elapsed_ms, LoadStats, PhaseStat};
use super::LoadOptions;
use crate::errors::{phase_error, Result};

/// Replace the store's dataset with the contents of `plan`
///
/// Everything between `begin` and `commit` is one transaction; a failure
/// there rolls back and leaves the previous data in place. Postload runs
/// after commit, so its failure is reported with
/// [`ExError::data_committed`] true. The session is released exactly once on
/// every path.
pub fn load<S: SessionSource>(
    source: &mut S,
    plan: &LoadPlan,
    options: &LoadOptions,
) -> Result<LoadStats> {
    let started = Instant::now();
    let mut state = StateTracker::new();
    let mut stats = LoadStats::default();

    let session = source.acquire().map_err(|e| {
        phase_error(ExErrorKind::Connection, &e).with_state(state.current().as_str())
    })?;
    let mut session = ReleaseGuard::new(session);
    state.advance(LoadState::Connected);

    if let Err(e) = session.begin() {
        let mut err =
            phase_error(ExErrorKind::Connection, &e).with_state(state.current().as_str());
        state.advance(LoadState::Released);
        if let Err(release_err) = session.release() {
            err.push_suppressed(phase_error(ExErrorKind::Connection, &release_err));
        }
        return Err(err);
    }

    let mut preload_started = false;
    if let Err(err) = run_transaction(
        &mut *session,
        plan,
        &mut stats,
        &mut state,
        &mut preload_started,
    ) {
        let err = err.with_state(state.current().as_str());
        return Err(abort(
            session,
            plan,
            options,
            &mut state,
            preload_started,
            err,
        ));
    }

    let postload = run_postload(&mut *session, plan, &mut stats);
    if postload.is_ok() {
        state.advance(LoadState::PostloadApplied);
    }
    state.advance(LoadState::Released);
    if let Err(e) = session.release() {
        tracing::warn!(error = e.message(), "Session release failed after commit");
    }

    stats.total_ms = elapsed_ms(started);
    postload.map(|()| stats)
}

/// Releases the wrapped session when dropped unless released explicitly
struct ReleaseGuard<S: LoadSession> {
    session: S,
    released: bool,
}

impl<S: LoadSession> ReleaseGuard<S> {
    fn new(session: S) -> Self {
        Self {
            session,
            released: false,
        }
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.session.release()
    }
}

impl<S: LoadSession> Deref for ReleaseGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: LoadSession> DerefMut for ReleaseGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: LoadSession> Drop for ReleaseGuard<S> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!(error = e.message(), "Session release failed");
        }
    }
}

/// Preload, deletes, inserts and commit
fn run_transaction<L: LoadSession>(
    session: &mut L,
    plan: &LoadPlan,
    stats: &mut LoadStats,
    state: &mut StateTracker,
    preload_started: &mut bool,
) -> Result<()> {
    let phase = Instant::now();
    let mut affected = 0;
    for sql in &plan.preload {
        *preload_started = true;
        affected += session
            .execute(sql)
            .map_err(|e| phase_error(ExErrorKind::Preload, &e).with_statement(sql.as_str()))?;
    }
    stats.preload = PhaseStat::since(phase, affected);
    state.advance(LoadState::PreloadApplied);

    for unit in plan.delete_sequence() {
        let phase = Instant::now();
        let deleted = session
            .execute(&unit.delete_sql)
            .map_err(|e| unit_error(ExErrorKind::Delete, unit, &unit.delete_sql, &e))?;
        tracing::debug!(table = unit.table.name(), rows_affected = deleted, "Deleted");
        stats.tables.entry(unit.table).or_default().delete = PhaseStat::since(phase, deleted);
    }
    state.advance(LoadState::Deleted);

    for unit in plan.insert_sequence() {
        let entry = stats.tables.entry(unit.table).or_default();
        if unit.rows.is_empty() {
            tracing::debug!(table = unit.table.name(), "Skipped empty batch");
            continue;
        }
        let phase = Instant::now();
        let inserted = session
            .execute_many(&unit.insert_sql, &unit.rows)
            .map_err(|e| unit_error(ExErrorKind::Insert, unit, &unit.insert_sql, &e))?;
        tracing::debug!(table = unit.table.name(), rows_affected = inserted, "Inserted");
        entry.insert = PhaseStat::since(phase, inserted);
    }
    state.advance(LoadState::Inserted);

    let phase = Instant::now();
    session
        .commit()
        .map_err(|e| phase_error(ExErrorKind::Commit, &e))?;
    stats.commit = PhaseStat::since(phase, 0);
    state.advance(LoadState::Committed);

    Ok(())
}

fn unit_error(kind: ExErrorKind, unit: &TableLoad, sql: &str, source: &ExError) -> ExError {
    phase_error(kind, source)
        .with_table(unit.table.name())
        .with_statement(sql)
}

/// Run every reseed and restore statement, even after one fails
///
/// Reports the first failure and how many statements failed.
fn run_postload<L: LoadSession>(
    session: &mut L,
    plan: &LoadPlan,
    stats: &mut LoadStats,
) -> Result<()> {
    let phase = Instant::now();
    let mut attempted = 0;
    let mut affected = 0;
    let mut failures: Vec<ExError> = Vec::new();
    for sql in plan.postload() {
        attempted += 1;
        match session.execute(sql) {
            Ok(n) => affected += n,
            Err(e) => {
                tracing::warn!(statement = sql, error = e.message(), "Postload statement failed");
                failures.push(e.with_statement(sql));
            }
        }
    }
    stats.postload = PhaseStat::since(phase, affected);

    let mut failures = failures.into_iter();
    let Some(first) = failures.next() else {
        return Ok(());
    };
    let failed = 1 + failures.len();
    let mut err = phase_error(ExErrorKind::Postload, &first)
        .with_state(LoadState::Committed.as_str())
        .with_message(format!(
            "{} of {} postload statements failed; first: {}",
            failed,
            attempted,
            first.message()
        ));
    for other in failures {
        err.push_suppressed(phase_error(ExErrorKind::Postload, &other));
    }
    Err(err)
}

/// Failure path: rollback, optional restoration, release
///
/// Only the restore statements run here. The reseed statements are
/// post-commit work: after a rollback they would rewind identity sequences
/// below ids the store already issued. Secondary failures are attached to
/// `err` and never replace it.
fn abort<L: LoadSession>(
    mut session: ReleaseGuard<L>,
    plan: &LoadPlan,
    options: &LoadOptions,
    state: &mut StateTracker,
    preload_started: bool,
    mut err: ExError,
) -> ExError {
    state.advance(LoadState::Aborting);
    tracing::warn!(
        err_code = err.code(),
        table = err.table().unwrap_or(""),
        error = err.message(),
        "Load failed, rolling back"
    );

    match session.rollback() {
        Ok(()) => state.advance(LoadState::RolledBack),
        Err(e) => err.push_suppressed(phase_error(ExErrorKind::Rollback, &e)),
    }

    if options.restore_on_failure && preload_started {
        for sql in &plan.restore {
            if let Err(e) = session.execute(sql) {
                err.push_suppressed(
                    phase_error(ExErrorKind::Postload, &e).with_statement(sql.as_str()),
                );
            }
        }
    }

    state.advance(LoadState::Released);
    if let Err(e) = session.release() {
        err.push_suppressed(phase_error(ExErrorKind::Connection, &e));
    }
    err
}
