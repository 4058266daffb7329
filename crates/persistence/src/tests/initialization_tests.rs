// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::{Path, PathBuf};

use diesel::prelude::*;
use diesel::sql_types::Text;
use retail_analytics::{CommitReceipt, PendingRow, Session};
use retail_analytics_domain::{EntityKind, Region, RegionId};

use crate::SqlitePersistence;
use crate::error::PersistenceError;
use crate::tests::helpers::create_test_persistence;

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

fn remove_database_files(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

fn create_region_row(name: &str) -> PendingRow {
    PendingRow::Region(Region {
        name: String::from(name),
    })
}

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();

    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    assert_eq!(persistence.verify_foreign_key_enforcement(), Ok(()));
}

#[test]
fn test_migrations_create_empty_tables() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    for kind in EntityKind::ALL {
        assert_eq!(persistence.count_rows(kind).unwrap(), 0, "{kind} not empty");
    }
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: SqlitePersistence = create_test_persistence();
    let mut second: SqlitePersistence = create_test_persistence();

    first.add(create_region_row("Norte"));
    first.commit().unwrap();

    assert_eq!(first.count_rows(EntityKind::Region).unwrap(), 1);
    assert_eq!(second.count_rows(EntityKind::Region).unwrap(), 0);
}

#[test]
fn test_file_database_survives_reopen() {
    let path: PathBuf =
        std::env::temp_dir().join(format!("retail_reopen_{}.db", std::process::id()));

    {
        let mut persistence: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
        persistence.add(create_region_row("Norte"));
        persistence.add(create_region_row("Sul"));
        persistence.commit().unwrap();
    }

    let mut reopened: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
    let regions: u64 = reopened.count_rows(EntityKind::Region).unwrap();
    drop(reopened);
    remove_database_files(&path);

    assert_eq!(regions, 2);
}

#[test]
fn test_file_database_uses_wal_journal() {
    let path: PathBuf = std::env::temp_dir().join(format!("retail_wal_{}.db", std::process::id()));

    let mut persistence: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
    let mode: JournalMode = diesel::sql_query("PRAGMA journal_mode")
        .get_result(&mut persistence.conn)
        .unwrap();
    let enforced: Result<(), PersistenceError> = persistence.verify_foreign_key_enforcement();
    drop(persistence);
    remove_database_files(&path);

    assert_eq!(mode.journal_mode.to_lowercase(), "wal");
    assert_eq!(enforced, Ok(()));
}

#[test]
fn test_inserts_report_identifiers_assigned_by_the_database() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence.add(create_region_row("Norte"));
    persistence.commit().unwrap();

    persistence.add(create_region_row("Sul"));
    persistence.add(create_region_row("Leste"));
    let receipt: CommitReceipt = persistence.commit().unwrap();

    assert_eq!(receipt.region_ids(), vec![RegionId::new(2), RegionId::new(3)]);
}
