//! Full replace of the dataset from a snapshot.
//!
//! ## Pipeline (in order):
//! 1. Normalize the snapshot into a load plan (pure, no store access)
//! 2. dry_run short-circuit (no store access)
//! 3. Load the plan in one transaction
//!
//! Any failure leaves the previous dataset in place, except a postload
//! failure, which is reported after the new data is committed.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;
use std::time::Instant;

use appdata_core::errors::{ExError, ExErrorKind};
use appdata_core::{log_op_end, log_op_error, log_op_start, normalize, AppData, Table};
use appdata_core_types::RequestContext;
use appdata_store::errors::Result;
use appdata_store::{load, LoadOptions, LoadStats};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

const OP: &str = "replace_app_data";

/// Options for a replace operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplaceOptions {
    /// If true, normalize and report batch sizes without touching the store.
    pub dry_run: bool,
    pub load: LoadOptions,
}

impl ReplaceOptions {
    /// Parse options from a TOML document, e.g.
    ///
    /// ```toml
    /// dry_run = false
    ///
    /// [load]
    /// restore_on_failure = true
    /// ```
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_options")
                .with_message(e.to_string())
        })
    }
}

/// Outcome of a replace.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceReport {
    pub request_id: String,
    pub caller: Option<String>,
    pub dry_run: bool,
    /// Rows per table in the snapshot after flattening
    pub row_counts: BTreeMap<Table, usize>,
    /// Time spent building the load plan
    pub plan_ms: u64,
    /// `None` in dry-run mode
    pub load: Option<LoadStats>,
    pub total_ms: u64,
}

/// Replace every department, package, user, asset, assignment, review and
/// history row with the contents of `snapshot`.
///
/// ## Arguments
/// - `conn`: Database connection, exclusively borrowed for the whole load
/// - `snapshot`: Desired end state; consumed
/// - `options`: dry_run / loader switches
/// - `ctx`: Request id and caller, logged and echoed in the report
pub fn replace_app_data(
    conn: &mut Connection,
    snapshot: AppData,
    options: &ReplaceOptions,
    ctx: &RequestContext,
) -> Result<ReplaceReport> {
    let started = Instant::now();
    log_op_start!(
        OP,
        request_id = ctx.request_id.as_str(),
        caller = ctx.caller.as_deref().unwrap_or(""),
        dry_run = options.dry_run
    );

    let result = run(conn, snapshot, options, ctx, started)
        .map_err(|e| e.with_request_id(ctx.request_id.clone()));

    let duration_ms = elapsed_ms(started);
    match &result {
        Ok(report) => {
            log_op_end!(
                OP,
                duration_ms = duration_ms,
                request_id = ctx.request_id.as_str(),
                rows = report.row_counts.values().sum::<usize>()
            );
        }
        Err(e) => {
            log_op_error!(
                OP,
                e.clone(),
                duration_ms = duration_ms,
                request_id = ctx.request_id.as_str(),
                data_committed = e.data_committed()
            );
        }
    }
    result
}

fn run(
    conn: &mut Connection,
    snapshot: AppData,
    options: &ReplaceOptions,
    ctx: &RequestContext,
    started: Instant,
) -> Result<ReplaceReport> {
    // Step 1: Normalize
    let plan_started = Instant::now();
    let plan = normalize(snapshot)?;
    let plan_ms = elapsed_ms(plan_started);

    let mut report = ReplaceReport {
        request_id: ctx.request_id.as_str().to_string(),
        caller: ctx.caller.clone(),
        dry_run: options.dry_run,
        row_counts: plan.row_counts(),
        plan_ms,
        load: None,
        total_ms: 0,
    };

    // Step 2: dry_run short-circuit
    if options.dry_run {
        report.total_ms = elapsed_ms(started);
        return Ok(report);
    }

    // Step 3: Load
    let stats = load(conn, &plan, &options.load)?;
    report.load = Some(stats);
    report.total_ms = elapsed_ms(started);
    Ok(report)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
