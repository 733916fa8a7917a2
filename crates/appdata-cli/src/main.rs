//! appdata CLI
//!
//! Command-line interface for replacing review data from snapshots

use appdata_core::errors::ExError;
use appdata_core::logging_facility::{self, Profile};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "appdata", version)]
#[command(about = "appdata - atomic full replace of review data", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "APPDATA_DB", default_value = "appdata.db")]
    db: PathBuf,

    /// Log output: dev (human-readable) or json
    #[arg(long, global = true, default_value = "dev")]
    log_format: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    Migrate,
    /// Replace all review data with the contents of a snapshot
    Replace(commands::replace::ReplaceArgs),
    /// Show software and schema version
    Version(commands::version::VersionArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format);

    let result = match cli.command {
        Commands::Migrate => commands::migrate::execute(&cli.db),
        Commands::Replace(args) => commands::replace::execute(args, &cli.db),
        Commands::Version(args) => commands::version::execute(args, &cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        // committed data with incomplete restoration needs operator attention,
        // not a retry
        let committed = e
            .downcast_ref::<ExError>()
            .is_some_and(ExError::data_committed);
        std::process::exit(if committed { 2 } else { 1 });
    }
}
