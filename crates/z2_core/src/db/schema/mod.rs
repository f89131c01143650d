//! Schema creation for the note store.
//!
//! # Invariants
//! - DDL is `IF NOT EXISTS` only, so running it on every open is harmless and
//!   databases that already carry the tables are adopted without data loss.
//! - `PRAGMA user_version` is stamped with `SCHEMA_VERSION` once, and never
//!   lowered.

use crate::db::DbResult;
use rusqlite::Connection;

/// Version stamped into `PRAGMA user_version` after the schema is created.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates any missing tables and indexes in one transaction.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    let stamped: u32 = tx.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if stamped < SCHEMA_VERSION {
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    }
    tx.commit()?;
    Ok(())
}
