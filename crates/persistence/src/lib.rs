// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the retail analytics data set.
//!
//! This crate owns the relational schema (embedded Diesel migrations), the
//! storage-backed implementation of the generator's `Session` trait, and the
//! read-only reporting queries used by the CLI.
//!
//! ## Database
//!
//! - **File-based** databases run in WAL mode.
//! - **In-memory** databases use a unique shared-cache name per adapter, so
//!   every test gets an isolated database.
//!
//! Foreign key enforcement is switched on for every connection and verified
//! at startup. The generator relies on it: a line item that references a
//! missing product fails its commit instead of being written.
//!
//! ## Commits
//!
//! Each `Session::commit` runs in a single database transaction. A failing
//! row rolls back every row of that commit and nothing of earlier commits.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use retail_analytics::{PendingRow, SaleKey};
use retail_analytics_domain::{EntityKind, SaleId};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod data_models;
mod database;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod session;

#[cfg(test)]
mod tests;

pub use data_models::{
    CustomerListing, Page, ProductListing, SaleDetail, SaleItemDetail, SaleSummary, SalesPage,
    StoreListing, TotalMismatch,
};
pub use error::PersistenceError;
pub use queries::reports::{DEFAULT_PAGE_SIZE, page_count};

use database::Storage;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The adapter under the name the CLI and tests use.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a `SQLite` connection.
///
/// Implements `Session` for the seeder and generator, and exposes the
/// reporting queries.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
    pending: Vec<PendingRow>,
    /// Sale identifiers assigned by earlier commits, by in-run key.
    sale_ids: BTreeMap<SaleKey, SaleId>,
    commits: usize,
}

impl Persistence {
    fn from_connection(conn: SqliteConnection) -> Self {
        Self {
            conn,
            pending: Vec::new(),
            sale_ids: BTreeMap::new(),
            commits: 0,
        }
    }

    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_retail_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = database::open(&shared_memory_url, Storage::SharedMemory)?;
        Ok(Self::from_connection(conn))
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing and migrated to the current schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = database::open(path_str, Storage::File)?;
        Ok(Self::from_connection(conn))
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        database::ensure_foreign_keys(&mut self.conn)
    }

    /// Number of successful commits through this adapter.
    #[must_use]
    pub const fn commits(&self) -> usize {
        self.commits
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// Counts the rows of the table holding `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count_rows(&mut self, kind: EntityKind) -> Result<u64, PersistenceError> {
        queries::counts::count_rows(&mut self.conn, kind)
    }

    /// Lists one 1-based page of sales with customer, salesperson and store
    /// names.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` or `per_page` is zero, or the database
    /// cannot be queried.
    pub fn list_sales_page(
        &mut self,
        page: u64,
        per_page: u64,
    ) -> Result<SalesPage, PersistenceError> {
        queries::reports::list_sales_page(&mut self.conn, page, per_page)
    }

    /// Lists one 1-based page of customers.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` or `per_page` is zero, or the database
    /// cannot be queried.
    pub fn list_customers(
        &mut self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<CustomerListing>, PersistenceError> {
        queries::listings::list_customers(&mut self.conn, page, per_page)
    }

    /// Lists one 1-based page of products with their category names.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` or `per_page` is zero, or the database
    /// cannot be queried.
    pub fn list_products(
        &mut self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<ProductListing>, PersistenceError> {
        queries::listings::list_products(&mut self.conn, page, per_page)
    }

    /// Lists one 1-based page of stores with their region names.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` or `per_page` is zero, or the database
    /// cannot be queried.
    pub fn list_stores(
        &mut self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<StoreListing>, PersistenceError> {
        queries::listings::list_stores(&mut self.conn, page, per_page)
    }

    /// Loads one sale with its line items and payment.
    ///
    /// # Errors
    ///
    /// Returns `SaleNotFound` if the sale does not exist, or an error if the
    /// database cannot be queried.
    pub fn get_sale_detail(&mut self, sale_id: SaleId) -> Result<SaleDetail, PersistenceError> {
        queries::reports::get_sale_detail(&mut self.conn, sale_id)
    }

    /// Finds sales whose cached total differs from the sum of their line
    /// items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn find_inconsistent_sale_totals(
        &mut self,
    ) -> Result<Vec<TotalMismatch>, PersistenceError> {
        queries::reports::find_inconsistent_sale_totals(&mut self.conn)
    }

    /// Counts sales whose customer, salesperson or store does not resolve.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count_dangling_sale_references(&mut self) -> Result<u64, PersistenceError> {
        queries::reports::count_dangling_sale_references(&mut self.conn)
    }
}
