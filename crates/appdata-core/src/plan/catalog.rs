//! Statement catalog for the SQLite store
//!
//! Bind names in the insert statements are the keys the normalizer puts into
//! each [`Row`](super::Row). Physical names match `001_initial_schema.sql` in
//! the store crate.

use super::{DeleteMode, Table};

/// Delete and insert statements of one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStatements {
    pub delete_mode: DeleteMode,
    pub delete_sql: &'static str,
    pub insert_sql: &'static str,
}

/// Run inside the transaction, before the first delete.
///
/// Foreign keys become deferred until commit, and the triggers on `review` and
/// `asset` stop firing so bulk rows do not generate history or stats cleanup.
pub const PRELOAD: &[&str] = &[
    "PRAGMA defer_foreign_keys = ON",
    "UPDATE load_control SET triggers_enabled = 0 WHERE table_name = 'review'",
    "UPDATE load_control SET triggers_enabled = 0 WHERE table_name = 'asset'",
];

/// Run after commit: re-anchor every AUTOINCREMENT sequence on the loaded
/// maximum.
///
/// These run in autocommit and are never part of a failed load; on the
/// failure path they would rewind sequences past ids already issued.
pub const RESEED: &[&str] = &[
    "UPDATE sqlite_sequence SET seq = (SELECT COALESCE(MAX(asset_id), 0) FROM asset) WHERE name = 'asset'",
    "UPDATE sqlite_sequence SET seq = (SELECT COALESCE(MAX(package_id), 0) FROM package) WHERE name = 'package'",
    "UPDATE sqlite_sequence SET seq = (SELECT COALESCE(MAX(review_id), 0) FROM review) WHERE name = 'review'",
    "UPDATE sqlite_sequence SET seq = (SELECT COALESCE(MAX(history_id), 0) FROM review_history) WHERE name = 'review_history'",
    "UPDATE sqlite_sequence SET seq = (SELECT COALESCE(MAX(id), 0) FROM stats_asset_stig) WHERE name = 'stats_asset_stig'",
    "UPDATE sqlite_sequence SET seq = (SELECT COALESCE(MAX(sa_id), 0) FROM stig_asset_map) WHERE name = 'stig_asset_map'",
    "UPDATE sqlite_sequence SET seq = (SELECT COALESCE(MAX(user_id), 0) FROM user_data) WHERE name = 'user_data'",
    "UPDATE sqlite_sequence SET seq = (SELECT COALESCE(MAX(id), 0) FROM user_stig_asset_map) WHERE name = 'user_stig_asset_map'",
];

/// Undo every suspension made by [`PRELOAD`]. Runs after the reseed on
/// success and again after a rollback.
pub const RESTORE: &[&str] = &[
    "UPDATE load_control SET triggers_enabled = 1 WHERE table_name = 'review'",
    "UPDATE load_control SET triggers_enabled = 1 WHERE table_name = 'asset'",
    "PRAGMA defer_foreign_keys = OFF",
];

pub fn statements(table: Table) -> TableStatements {
    match table {
        Table::Department => TableStatements {
            delete_mode: DeleteMode::Delete,
            delete_sql: "DELETE FROM department",
            insert_sql: "INSERT INTO department (dept_id, name) VALUES (:deptId, :name)",
        },
        Table::Package => TableStatements {
            delete_mode: DeleteMode::Delete,
            delete_sql: "DELETE FROM package",
            insert_sql: r#"INSERT INTO package (
                package_id, name, emass_id, req_rar, poc_name, poc_email, poc_phone
            ) VALUES (
                :packageId, :name, :emassId, :reqRar, :pocName, :pocEmail, :pocPhone
            )"#,
        },
        Table::UserData => TableStatements {
            delete_mode: DeleteMode::Delete,
            delete_sql: "DELETE FROM user_data",
            insert_sql: r#"INSERT INTO user_data (
                user_id, username, display, dept_id, access_level, can_admin
            ) VALUES (
                :userId, :username, :display, :deptId, :accessLevel, :canAdmin
            )"#,
        },
        Table::Asset => TableStatements {
            delete_mode: DeleteMode::Delete,
            delete_sql: "DELETE FROM asset",
            insert_sql: r#"INSERT INTO asset (
                asset_id, name, ip, dept_id, package_id, nonnetwork
            ) VALUES (
                :assetId, :name, :ip, :deptId, :packageId, :nonnetwork
            )"#,
        },
        Table::StigAssetMap => TableStatements {
            delete_mode: DeleteMode::Delete,
            delete_sql: "DELETE FROM stig_asset_map",
            insert_sql: "INSERT INTO stig_asset_map (asset_id, benchmark_id) VALUES (:assetId, :benchmarkId)",
        },
        // sa_id is resolved during the insert so the batch stays one round trip
        Table::UserStigAssetMap => TableStatements {
            delete_mode: DeleteMode::Delete,
            delete_sql: "DELETE FROM user_stig_asset_map",
            insert_sql: r#"INSERT INTO user_stig_asset_map (user_id, sa_id) VALUES (
                :userId,
                (SELECT sa_id FROM stig_asset_map WHERE benchmark_id = :benchmarkId AND asset_id = :assetId)
            )"#,
        },
        Table::Review => TableStatements {
            delete_mode: DeleteMode::Truncate,
            delete_sql: "DELETE FROM review",
            insert_sql: r#"INSERT INTO review (
                asset_id, rule_id, result_id, result_comment, action_id, action_comment,
                user_id, auto_result, ts, reject_text, reject_user_id, status_id
            ) VALUES (
                :assetId, :ruleId, :result, :resultComment, :action, :actionComment,
                :userId, :autoResult, :ts, :rejectText, :rejectUserId, :status
            )"#,
        },
        Table::ReviewHistory => TableStatements {
            delete_mode: DeleteMode::Truncate,
            delete_sql: "DELETE FROM review_history",
            insert_sql: r#"INSERT INTO review_history (
                asset_id, rule_id, activity_type, column_name, old_value, new_value, user_id, ts
            ) VALUES (
                :assetId, :ruleId, :activityType, :columnName, :oldValue, :newValue, :userId, :ts
            )"#,
        },
    }
}
