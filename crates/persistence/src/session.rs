// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use diesel::Connection;
use retail_analytics::{
    CategoryFilter, CategoryRecord, CommitReceipt, PendingRow, SaleKey, Session,
};
use retail_analytics_domain::{EntityKind, SaleId};
use tracing::{debug, warn};

use crate::error::PersistenceError;
use crate::{Persistence, mutations, queries};

impl Session for Persistence {
    type Error = PersistenceError;

    fn add(&mut self, row: PendingRow) {
        self.pending.push(row);
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    fn commit(&mut self) -> Result<CommitReceipt, Self::Error> {
        let rows: Vec<PendingRow> = std::mem::take(&mut self.pending);
        let committed: &BTreeMap<SaleKey, SaleId> = &self.sale_ids;
        let mut assigned: BTreeMap<SaleKey, SaleId> = BTreeMap::new();

        let receipt: CommitReceipt = self
            .conn
            .transaction(|conn| mutations::apply_rows(conn, rows, committed, &mut assigned))
            .inspect_err(|e| warn!(error = %e, "Commit rolled back"))?;

        self.sale_ids.extend(assigned);
        self.commits += 1;
        debug!(commit = self.commits, rows = receipt.rows(), "SQLite commit applied");
        Ok(receipt)
    }

    fn rollback(&mut self) {
        self.pending.clear();
    }

    fn categories(&mut self, filter: &CategoryFilter) -> Result<Vec<CategoryRecord>, Self::Error> {
        queries::catalog::list_categories(&mut self.conn, filter)
    }

    fn count(&mut self, kind: EntityKind) -> Result<u64, Self::Error> {
        queries::counts::count_rows(&mut self.conn, kind)
    }
}
