#![allow(clippy::result_large_err)]

use appdata_store::errors::Result;
use appdata_store::migrations::latest_migration_id;
use rusqlite::Connection;
use serde::Serialize;

/// Software and schema version of a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: String,
    /// Latest applied migration; `None` for a store that was never migrated
    pub schema_version: Option<String>,
}

pub fn get_version(conn: &Connection) -> Result<VersionInfo> {
    Ok(VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: latest_migration_id(conn)?,
    })
}
