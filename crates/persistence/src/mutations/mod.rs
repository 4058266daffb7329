// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write path of the `SQLite` session.
//!
//! A commit hands its pending rows to [`apply_rows`], which runs inside the
//! caller's transaction. Reference rows and sales are inserted one at a time
//! because their storage-assigned identifiers are needed immediately. Line
//! items and payments only need their sale's identifier, so they are staged
//! and written in chunked multi-row inserts once every row of the commit has
//! been resolved.

pub mod reference;
pub mod transactional;

use std::collections::BTreeMap;

use diesel::SqliteConnection;
use retail_analytics::{AssignedId, CommitReceipt, PendingRow, SaleKey};
use retail_analytics_domain::SaleId;

use crate::data_models::{NewPayment, NewSaleLineItem};
use crate::error::PersistenceError;

/// Rows of one commit, plus the sale identifiers assigned so far.
struct Staging<'a> {
    committed: &'a BTreeMap<SaleKey, SaleId>,
    assigned: BTreeMap<SaleKey, SaleId>,
    line_items: Vec<NewSaleLineItem>,
    payments: Vec<NewPayment>,
    receipt: CommitReceipt,
}

impl Staging<'_> {
    /// Sale keys assigned in this commit shadow those of earlier commits.
    fn resolve(&self, key: SaleKey) -> Result<SaleId, PersistenceError> {
        self.assigned
            .get(&key)
            .or_else(|| self.committed.get(&key))
            .copied()
            .ok_or(PersistenceError::UnresolvedSaleKey(key))
    }

    fn apply(
        &mut self,
        conn: &mut SqliteConnection,
        row: PendingRow,
    ) -> Result<(), PersistenceError> {
        let kind = row.kind();
        match row {
            PendingRow::Region(region) => {
                let id = reference::insert_region(conn, &region)?;
                self.receipt.assign(AssignedId::Region(id));
            }
            PendingRow::Category(category) => {
                let id = reference::insert_category(conn, &category)?;
                self.receipt.assign(AssignedId::Category(id));
            }
            PendingRow::Store(store) => {
                let id = reference::insert_store(conn, &store)?;
                self.receipt.assign(AssignedId::Store(id));
            }
            PendingRow::Product(product) => {
                let id = reference::insert_product(conn, &product)?;
                self.receipt.assign(AssignedId::Product(id));
            }
            PendingRow::Customer(customer) => transactional::insert_customer(conn, &customer)?,
            PendingRow::Salesperson(salesperson) => {
                transactional::insert_salesperson(conn, &salesperson)?;
            }
            PendingRow::Sale { key, sale } => {
                let id: SaleId = transactional::insert_sale(conn, &sale)?;
                self.assigned.insert(key, id);
                self.receipt.assign(AssignedId::Sale { key, id });
            }
            PendingRow::LineItem { sale, item } => {
                let sale_id: SaleId = self.resolve(sale)?;
                self.line_items.push(transactional::line_item_row(sale_id, &item)?);
            }
            PendingRow::Payment { sale, payment } => {
                let sale_id: SaleId = self.resolve(sale)?;
                self.payments.push(transactional::payment_row(sale_id, &payment)?);
            }
        }
        self.receipt.record(kind);
        Ok(())
    }
}

/// Writes `rows` in order and returns the commit receipt.
///
/// Newly assigned sale identifiers are added to `assigned`; `committed`
/// holds those of earlier commits. The caller owns the transaction, so an
/// error here leaves nothing behind once it rolls back.
///
/// # Errors
///
/// Returns an error if a line item or payment references an unknown sale
/// key, or if any insert fails (constraint violations included).
pub fn apply_rows(
    conn: &mut SqliteConnection,
    rows: Vec<PendingRow>,
    committed: &BTreeMap<SaleKey, SaleId>,
    assigned: &mut BTreeMap<SaleKey, SaleId>,
) -> Result<CommitReceipt, PersistenceError> {
    let mut staging: Staging<'_> = Staging {
        committed,
        assigned: BTreeMap::new(),
        line_items: Vec::new(),
        payments: Vec::new(),
        receipt: CommitReceipt::new(),
    };

    for row in rows {
        staging.apply(conn, row)?;
    }

    transactional::insert_line_items(conn, &staging.line_items)?;
    transactional::insert_payments(conn, &staging.payments)?;

    assigned.extend(staging.assigned);
    Ok(staging.receipt)
}
