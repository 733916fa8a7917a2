//! Checksum validation for migrations
//!
//! Computes SHA256 checksums of migration SQL to detect a database built
//! from a different schema

use sha2::{Digest, Sha256};

/// SHA256 of the migration text, hex encoded
///
/// Line endings are normalized first so a CRLF checkout of the migration
/// files hashes the same as the LF original.
pub fn compute_checksum(sql: &str) -> String {
    let mut hasher = Sha256::new();
    for line in sql.lines() {
        hasher.update(line.trim_end_matches('\r').as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}
