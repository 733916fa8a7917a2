//! Schema migration command
//!
//! Usage: appdata migrate [--db <PATH>]

use std::path::Path;

/// Execute migrate command
pub fn execute(db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = appdata_store::db::open(db)?;
    let applied = appdata_store::migrations::apply_migrations(&mut conn)?;

    if applied.is_empty() {
        println!("Schema up to date");
    }
    for id in applied {
        println!("✓ Applied {}", id);
    }

    Ok(())
}
