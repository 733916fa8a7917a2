//! Replace command
//!
//! Usage: appdata replace <SNAPSHOT> [--options <TOML>] [--dry-run]
//!        [--no-restore-on-failure] [--caller <NAME>] [--json]

use appdata_core::{AppData, Table};
use appdata_core_types::RequestContext;
use appdata_engine::commands::replace::{replace_app_data, ReplaceOptions, ReplaceReport};
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ReplaceArgs {
    /// Snapshot JSON file, or `-` for stdin
    pub snapshot: PathBuf,

    /// TOML file with replace options; flags below override it
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Normalize and report batch sizes without touching the database
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the restore statements after a rollback
    #[arg(long)]
    pub no_restore_on_failure: bool,

    /// Identity recorded in logs and the report
    #[arg(long)]
    pub caller: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute replace command
pub fn execute(args: ReplaceArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = match &args.options {
        Some(path) => ReplaceOptions::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => ReplaceOptions::default(),
    };
    options.dry_run |= args.dry_run;
    if args.no_restore_on_failure {
        options.load.restore_on_failure = false;
    }

    let snapshot = read_snapshot(&args.snapshot)?;

    let mut ctx = RequestContext::new();
    if let Some(caller) = args.caller {
        ctx = ctx.with_caller(caller);
    }

    // dry runs never open the database file
    let mut conn = if options.dry_run {
        appdata_store::db::open_in_memory()?
    } else {
        let mut conn = appdata_store::db::open(db)?;
        appdata_store::migrations::apply_migrations(&mut conn)?;
        conn
    };

    let report = replace_app_data(&mut conn, snapshot, &options, &ctx)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn read_snapshot(path: &Path) -> Result<AppData, Box<dyn std::error::Error>> {
    let snapshot = if path.as_os_str() == "-" {
        AppData::from_reader(std::io::stdin().lock())?
    } else {
        AppData::from_reader(BufReader::new(File::open(path)?))?
    };
    Ok(snapshot)
}

fn print_summary(report: &ReplaceReport) {
    let mode = if report.dry_run { " (dry run)" } else { "" };
    println!("Replace {}{}", report.request_id, mode);
    println!("{:<18} {:>8} {:>8} {:>8}", "table", "rows", "deleted", "ms");
    for table in Table::INSERT_ORDER {
        let rows = report.row_counts.get(&table).copied().unwrap_or(0);
        match &report.load {
            Some(stats) => {
                let ms = stats
                    .tables
                    .get(&table)
                    .map_or(0, |t| t.delete.duration_ms + t.insert.duration_ms);
                println!(
                    "{:<18} {:>8} {:>8} {:>8}",
                    table.name(),
                    stats.inserted(table),
                    stats.deleted(table),
                    ms
                );
            }
            None => println!("{:<18} {:>8} {:>8} {:>8}", table.name(), rows, "-", "-"),
        }
    }
    println!("plan {} ms, total {} ms", report.plan_ms, report.total_ms);
}
