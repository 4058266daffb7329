// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup.
//!
//! Every connection gets the same treatment before the adapter uses it:
//! foreign keys on, WAL journaling for files, the embedded schema migrated,
//! then a read-back of the foreign key pragma. Diesel has no pragma DSL, so
//! the pragmas are the only raw SQL here.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Where a connection keeps its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// A named shared-cache in-memory database.
    SharedMemory,
    /// A database file, journaled with WAL.
    File,
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

fn set_pragma(conn: &mut SqliteConnection, statement: &str) -> Result<(), PersistenceError> {
    diesel::sql_query(statement)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("{statement}: {e}")))?;
    Ok(())
}

/// Opens `url` and prepares it for the adapter.
///
/// # Errors
///
/// Returns an error if the connection cannot be established, a pragma or
/// migration fails, or foreign keys are still off afterwards.
pub fn open(url: &str, storage: Storage) -> Result<SqliteConnection, PersistenceError> {
    info!(url, ?storage, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // Must run outside a transaction, so before the migrations
    set_pragma(&mut conn, "PRAGMA foreign_keys = ON")?;
    if storage == Storage::File {
        set_pragma(&mut conn, "PRAGMA journal_mode = WAL")?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    debug!(applied, "Schema migrations applied");

    ensure_foreign_keys(&mut conn)?;
    Ok(conn)
}

/// Fails unless the connection enforces foreign keys.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled` when enforcement is off, or an
/// error if the pragma cannot be read.
pub fn ensure_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}
