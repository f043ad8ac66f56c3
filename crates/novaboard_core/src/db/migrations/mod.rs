//! Schema steps for the NovaBoard key-value database.
//!
//! # Responsibility
//! - Create the `kv_entries` table that backs project persistence.
//! - Bring an older database up to [`latest_version`] in one transaction.
//!
//! # Invariants
//! - Step numbers start at 1 and increase by one.
//! - `PRAGMA user_version` always equals the last applied step.
//! - A database written by a newer build is refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(user_version after the step, DDL)` pairs in apply order.
const SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_entries.sql"))];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Applies every step above the database's current `user_version`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if found > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }

    let pending: Vec<_> = SCHEMA_STEPS
        .iter()
        .filter(|(version, _)| *version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, ddl) in pending {
        tx.execute_batch(ddl)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok store=kv_entries from={} to={}",
        found, latest
    );
    Ok(())
}
