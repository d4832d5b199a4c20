//! SQLite database module for cardmatch
//!
//! Repository functions live in the per-table submodules and take an explicit
//! [`Transaction`] handle, so every multi-statement operation states its unit
//! of work in its signature.

pub mod assignments;
pub mod cards;
pub mod projects;
mod schema;
pub mod technologies;

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, ErrorCode, Transaction, TransactionBehavior};

use crate::config::DatabaseConfig;
use crate::error::{MatchError, Result};

pub use schema::{create_schema, SchemaCreateResult, CURRENT_SCHEMA_VERSION};

/// File name of the database inside a store
pub const DB_FILE: &str = "cardmatch.db";

/// SQLite database for cardmatch
///
/// One `Database` wraps one connection. Concurrent callers each open their
/// own; write transactions serialize on the SQLite write lock.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given store root
    #[tracing::instrument(skip(store_root, config), fields(store_root = %store_root.display()))]
    pub fn open(store_root: &Path, config: &DatabaseConfig) -> Result<Self> {
        let db_path = store_root.join(DB_FILE);

        let conn = Connection::open(&db_path).map_err(|e| {
            MatchError::storage(&format!("open database at {}", db_path.display()), e)
        })?;

        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .map_err(|e| MatchError::storage("set busy timeout", e))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| MatchError::storage("enable WAL mode", e))?;

        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| MatchError::storage("enable foreign keys", e))?;

        match create_schema(&conn).map_err(|e| MatchError::storage("create database schema", e))? {
            SchemaCreateResult::TooNew(v) => {
                return Err(MatchError::InvalidStore {
                    reason: format!(
                        "database schema version {} is newer than supported version {}",
                        v, CURRENT_SCHEMA_VERSION
                    ),
                })
            }
            SchemaCreateResult::Created | SchemaCreateResult::Current => {}
        }

        Ok(Database { conn })
    }

    /// Begin a write transaction.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock up front, so checks made inside
    /// the transaction cannot be invalidated by another writer before commit.
    pub fn write_tx(&self) -> Result<Transaction<'_>> {
        Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)
            .map_err(|e| MatchError::storage("start write transaction", e))
    }

    /// Begin a read transaction giving a consistent snapshot
    pub fn read_tx(&self) -> Result<Transaction<'_>> {
        Transaction::new_unchecked(&self.conn, TransactionBehavior::Deferred)
            .map_err(|e| MatchError::storage("start read transaction", e))
    }

    pub fn get_schema_version(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| MatchError::storage("get schema version", e))
    }
}

/// Commit a transaction, reporting failure without exposing the SQLite message
pub fn commit(tx: Transaction<'_>, operation: &str) -> Result<()> {
    tx.commit()
        .map_err(|e| MatchError::storage(&format!("commit {}", operation), e))
}

/// Whether an error is a constraint violation (UNIQUE, CHECK, FOREIGN KEY)
pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl Drop for Database {
    fn drop(&mut self) {
        // Checkpoint so rapidly reopened connections see a compact WAL
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}
