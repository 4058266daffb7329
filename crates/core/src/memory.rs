// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory [`Session`].
//!
//! Commits are applied to a staging copy of the tables and swapped in only
//! when every row passes its key and reference checks, so a failed commit
//! leaves the committed tables untouched.

use std::collections::BTreeMap;

use retail_analytics_domain::{
    Category, CategoryId, Customer, CustomerId, EntityKind, Payment, Product, ProductId, Region,
    RegionId, Sale, SaleId, SaleLineItem, Salesperson, SalespersonId, Store, StoreId,
};
use thiserror::Error;
use tracing::debug;

use crate::session::{
    AssignedId, CategoryFilter, CategoryRecord, CommitReceipt, PendingRow, SaleKey, Session,
};

/// Constraint violations raised by [`MemorySession::commit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Failure requested with [`MemorySession::failing_on_commit`].
    #[error("Injected failure on commit {commit}")]
    InjectedFailure { commit: usize },

    #[error("Duplicate {kind} identifier {id}")]
    DuplicateKey { kind: EntityKind, id: i64 },

    #[error("{kind} references missing {target} {id}")]
    DanglingReference {
        kind: EntityKind,
        target: EntityKind,
        id: i64,
    },

    #[error("No sale has been committed for {0}")]
    UnresolvedSaleKey(SaleKey),

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
}

/// Committed rows, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub regions: BTreeMap<RegionId, Region>,
    pub categories: BTreeMap<CategoryId, Category>,
    pub stores: BTreeMap<StoreId, Store>,
    pub products: BTreeMap<ProductId, Product>,
    pub customers: BTreeMap<CustomerId, Customer>,
    pub salespeople: BTreeMap<SalespersonId, Salesperson>,
    pub sales: BTreeMap<SaleId, Sale>,
    pub line_items: Vec<(SaleId, SaleLineItem)>,
    pub payments: Vec<(SaleId, Payment)>,
}

impl Tables {
    /// Line items belonging to `sale`.
    pub fn items_of(&self, sale: SaleId) -> impl Iterator<Item = &SaleLineItem> {
        self.line_items
            .iter()
            .filter(move |(owner, _)| *owner == sale)
            .map(|(_, item)| item)
    }

    fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Region => self.regions.len(),
            EntityKind::Category => self.categories.len(),
            EntityKind::Store => self.stores.len(),
            EntityKind::Product => self.products.len(),
            EntityKind::Customer => self.customers.len(),
            EntityKind::Salesperson => self.salespeople.len(),
            EntityKind::Sale => self.sales.len(),
            EntityKind::SaleLineItem => self.line_items.len(),
            EntityKind::Payment => self.payments.len(),
        }
    }
}

/// Next auto-increment value after the highest existing key.
fn next_id(last: Option<i64>) -> i64 {
    last.map_or(1, |id| id.saturating_add(1))
}

/// A [`Session`] over in-memory [`Tables`].
#[derive(Debug, Default)]
pub struct MemorySession {
    tables: Tables,
    pending: Vec<PendingRow>,
    sale_ids: BTreeMap<SaleKey, SaleId>,
    commits: usize,
    fail_on_commit: Option<usize>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `commit`-th call to `commit` (1-based) fail without writing.
    #[must_use]
    pub const fn failing_on_commit(mut self, commit: usize) -> Self {
        self.fail_on_commit = Some(commit);
        self
    }

    /// The committed tables.
    #[must_use]
    pub const fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Number of `commit` calls so far, failed ones included.
    #[must_use]
    pub const fn commits(&self) -> usize {
        self.commits
    }
}

/// Tables being written by one commit.
struct Staging {
    tables: Tables,
    sale_ids: BTreeMap<SaleKey, SaleId>,
    receipt: CommitReceipt,
}

impl Staging {
    fn apply(&mut self, row: PendingRow) -> Result<(), MemoryError> {
        let kind: EntityKind = row.kind();
        match row {
            PendingRow::Region(_)
            | PendingRow::Category(_)
            | PendingRow::Store(_)
            | PendingRow::Product(_) => self.insert_reference(row)?,
            PendingRow::Customer(customer) => {
                if self.tables.customers.contains_key(&customer.id) {
                    return Err(MemoryError::DuplicateKey {
                        kind,
                        id: customer.id.value(),
                    });
                }
                self.tables.customers.insert(customer.id, customer);
            }
            PendingRow::Salesperson(salesperson) => {
                if self.tables.salespeople.contains_key(&salesperson.id) {
                    return Err(MemoryError::DuplicateKey {
                        kind,
                        id: salesperson.id.value(),
                    });
                }
                if !self.tables.stores.contains_key(&salesperson.store_id) {
                    return Err(dangling(
                        kind,
                        EntityKind::Store,
                        salesperson.store_id.value(),
                    ));
                }
                self.tables.salespeople.insert(salesperson.id, salesperson);
            }
            PendingRow::Sale { .. } | PendingRow::LineItem { .. } | PendingRow::Payment { .. } => {
                self.insert_sale_row(row)?;
            }
        }
        self.receipt.record(kind);
        Ok(())
    }

    fn insert_reference(&mut self, row: PendingRow) -> Result<(), MemoryError> {
        let kind: EntityKind = row.kind();
        let tables: &mut Tables = &mut self.tables;
        let assigned: AssignedId = match row {
            PendingRow::Region(region) => {
                let id = RegionId::new(next_id(
                    tables.regions.keys().next_back().copied().map(RegionId::value),
                ));
                tables.regions.insert(id, region);
                AssignedId::Region(id)
            }
            PendingRow::Category(category) => {
                if tables.categories.values().any(|c| c.name == category.name) {
                    return Err(MemoryError::DuplicateCategory(category.name));
                }
                let id = CategoryId::new(next_id(
                    tables.categories.keys().next_back().copied().map(CategoryId::value),
                ));
                tables.categories.insert(id, category);
                AssignedId::Category(id)
            }
            PendingRow::Store(store) => {
                if !tables.regions.contains_key(&store.region_id) {
                    return Err(dangling(kind, EntityKind::Region, store.region_id.value()));
                }
                let id = StoreId::new(next_id(
                    tables.stores.keys().next_back().copied().map(StoreId::value),
                ));
                tables.stores.insert(id, store);
                AssignedId::Store(id)
            }
            PendingRow::Product(product) => {
                if !tables.categories.contains_key(&product.category_id) {
                    return Err(dangling(
                        kind,
                        EntityKind::Category,
                        product.category_id.value(),
                    ));
                }
                let id = ProductId::new(next_id(
                    tables.products.keys().next_back().copied().map(ProductId::value),
                ));
                tables.products.insert(id, product);
                AssignedId::Product(id)
            }
            _ => return Ok(()),
        };
        self.receipt.assign(assigned);
        Ok(())
    }

    fn resolve(&self, key: SaleKey) -> Result<SaleId, MemoryError> {
        self.sale_ids
            .get(&key)
            .copied()
            .ok_or(MemoryError::UnresolvedSaleKey(key))
    }

    fn insert_sale_row(&mut self, row: PendingRow) -> Result<(), MemoryError> {
        let kind: EntityKind = row.kind();
        match row {
            PendingRow::Sale { key, sale } => {
                let tables: &Tables = &self.tables;
                if !tables.customers.contains_key(&sale.customer_id) {
                    return Err(dangling(
                        kind,
                        EntityKind::Customer,
                        sale.customer_id.value(),
                    ));
                }
                if !tables.salespeople.contains_key(&sale.salesperson_id) {
                    return Err(dangling(
                        kind,
                        EntityKind::Salesperson,
                        sale.salesperson_id.value(),
                    ));
                }
                if !tables.stores.contains_key(&sale.store_id) {
                    return Err(dangling(kind, EntityKind::Store, sale.store_id.value()));
                }
                let id = SaleId::new(next_id(
                    tables.sales.keys().next_back().copied().map(SaleId::value),
                ));
                self.tables.sales.insert(id, sale);
                self.sale_ids.insert(key, id);
                self.receipt.assign(AssignedId::Sale { key, id });
            }
            PendingRow::LineItem { sale, item } => {
                let sale_id: SaleId = self.resolve(sale)?;
                if !self.tables.products.contains_key(&item.product_id) {
                    return Err(dangling(
                        kind,
                        EntityKind::Product,
                        item.product_id.value(),
                    ));
                }
                self.tables.line_items.push((sale_id, item));
            }
            PendingRow::Payment { sale, payment } => {
                let sale_id: SaleId = self.resolve(sale)?;
                self.tables.payments.push((sale_id, payment));
            }
            _ => {}
        }
        Ok(())
    }
}

const fn dangling(kind: EntityKind, target: EntityKind, id: i64) -> MemoryError {
    MemoryError::DanglingReference { kind, target, id }
}

impl Session for MemorySession {
    type Error = MemoryError;

    fn add(&mut self, row: PendingRow) {
        self.pending.push(row);
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    fn commit(&mut self) -> Result<CommitReceipt, Self::Error> {
        let rows: Vec<PendingRow> = std::mem::take(&mut self.pending);
        self.commits += 1;

        if self.fail_on_commit == Some(self.commits) {
            return Err(MemoryError::InjectedFailure {
                commit: self.commits,
            });
        }

        let mut staging: Staging = Staging {
            tables: self.tables.clone(),
            sale_ids: self.sale_ids.clone(),
            receipt: CommitReceipt::new(),
        };
        for row in rows {
            staging.apply(row)?;
        }

        self.tables = staging.tables;
        self.sale_ids = staging.sale_ids;
        debug!(
            commit = self.commits,
            rows = staging.receipt.rows(),
            "Memory commit applied"
        );
        Ok(staging.receipt)
    }

    fn rollback(&mut self) {
        self.pending.clear();
    }

    fn categories(&mut self, filter: &CategoryFilter) -> Result<Vec<CategoryRecord>, Self::Error> {
        Ok(self
            .tables
            .categories
            .iter()
            .filter(|(_, category)| filter.matches(&category.name))
            .map(|(id, category)| CategoryRecord {
                id: *id,
                name: category.name.clone(),
            })
            .collect())
    }

    fn count(&mut self, kind: EntityKind) -> Result<u64, Self::Error> {
        Ok(u64::try_from(self.tables.len(kind)).unwrap_or(u64::MAX))
    }
}
