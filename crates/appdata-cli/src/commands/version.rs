//! Version command
//!
//! Usage: appdata version [--json]

use appdata_engine::commands::version::get_version;
use clap::Args;
use std::path::Path;

#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute version command
pub fn execute(args: VersionArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let conn = appdata_store::db::open(db)?;
    let info = get_version(&conn)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!(
            "appdata {} (schema {})",
            info.version,
            info.schema_version.as_deref().unwrap_or("none")
        );
    }

    Ok(())
}
