//! Owned store handle for one process lifetime.
//!
//! # Responsibility
//! - Wrap a schema-ready connection behind explicit open/close operations.
//! - Report use-after-close as `DbError::Closed` instead of panicking.
//!
//! # Invariants
//! - A `Store` is open from construction until `close` succeeds.
//! - Dropping an unclosed `Store` still releases the connection.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;

/// File-backed (or in-memory) note store.
#[derive(Debug)]
pub struct Store {
    conn: Option<Connection>,
}

impl Store {
    /// Opens the store at `path`, creating the file and schema when absent.
    ///
    /// Safe to call on every startup; existing data is left untouched.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let conn = open_db(path)?;
        Ok(Self { conn: Some(conn) })
    }

    /// Opens a throwaway in-memory store with the full schema applied.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self { conn: Some(conn) })
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Borrows the live connection.
    ///
    /// # Errors
    /// - `DbError::Closed` after `close` succeeded.
    pub fn connection(&self) -> DbResult<&Connection> {
        self.conn.as_ref().ok_or(DbError::Closed)
    }

    /// Mutably borrows the live connection (needed for transactions).
    pub fn connection_mut(&mut self) -> DbResult<&mut Connection> {
        self.conn.as_mut().ok_or(DbError::Closed)
    }

    /// Releases the connection.
    ///
    /// # Errors
    /// - `DbError::Closed` when the store was already closed.
    /// - `DbError::Sqlite` when SQLite refuses to release the handle; the
    ///   handle is kept so a later drop can still release it.
    pub fn close(&mut self) -> DbResult<()> {
        let conn = self.conn.take().ok_or(DbError::Closed)?;
        match conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((conn, err)) => {
                error!(
                    "event=db_close module=db status=error error_code=db_close_failed error={}",
                    err
                );
                self.conn = Some(conn);
                Err(err.into())
            }
        }
    }
}
