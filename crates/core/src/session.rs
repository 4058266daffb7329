// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage collaborator.
//!
//! A [`Session`] buffers rows with `add`/`add_all` and makes them durable
//! with `commit`. Rows that reference a sale created in the same run carry
//! a [`SaleKey`] rather than a storage identifier; the session resolves it
//! when the sale is committed.

use std::collections::BTreeMap;

use retail_analytics_domain::{
    Category, CategoryId, Customer, EntityKind, Payment, Product, ProductId, Region, RegionId,
    Sale, SaleId, SaleLineItem, Salesperson, Store, StoreId,
};

/// In-run handle of a sale whose storage identifier is not known yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaleKey(usize);

impl SaleKey {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SaleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sale#{}", self.0)
    }
}

/// A row waiting for the next commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRow {
    Region(Region),
    Category(Category),
    Store(Store),
    Product(Product),
    Customer(Customer),
    Salesperson(Salesperson),
    Sale { key: SaleKey, sale: Sale },
    LineItem { sale: SaleKey, item: SaleLineItem },
    Payment { sale: SaleKey, payment: Payment },
}

impl PendingRow {
    /// The table this row belongs to.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Region(_) => EntityKind::Region,
            Self::Category(_) => EntityKind::Category,
            Self::Store(_) => EntityKind::Store,
            Self::Product(_) => EntityKind::Product,
            Self::Customer(_) => EntityKind::Customer,
            Self::Salesperson(_) => EntityKind::Salesperson,
            Self::Sale { .. } => EntityKind::Sale,
            Self::LineItem { .. } => EntityKind::SaleLineItem,
            Self::Payment { .. } => EntityKind::Payment,
        }
    }
}

/// An identifier assigned by storage during a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignedId {
    Region(RegionId),
    Category(CategoryId),
    Store(StoreId),
    Product(ProductId),
    Sale { key: SaleKey, id: SaleId },
}

/// What a successful commit wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReceipt {
    assigned: Vec<AssignedId>,
    counts: BTreeMap<EntityKind, usize>,
}

impl CommitReceipt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one written row of `kind`.
    pub fn record(&mut self, kind: EntityKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Records a storage-assigned identifier.
    pub fn assign(&mut self, id: AssignedId) {
        self.assigned.push(id);
    }

    /// Total rows written.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.counts.values().sum()
    }

    /// Rows written for one table.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Storage-assigned identifiers in insertion order.
    #[must_use]
    pub fn assigned(&self) -> &[AssignedId] {
        &self.assigned
    }

    #[must_use]
    pub fn region_ids(&self) -> Vec<RegionId> {
        self.assigned
            .iter()
            .filter_map(|id| match id {
                AssignedId::Region(region) => Some(*region),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.assigned
            .iter()
            .filter_map(|id| match id {
                AssignedId::Category(category) => Some(*category),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn store_ids(&self) -> Vec<StoreId> {
        self.assigned
            .iter()
            .filter_map(|id| match id {
                AssignedId::Store(store) => Some(*store),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.assigned
            .iter()
            .filter_map(|id| match id {
                AssignedId::Product(product) => Some(*product),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn sale_ids(&self) -> Vec<(SaleKey, SaleId)> {
        self.assigned
            .iter()
            .filter_map(|id| match id {
                AssignedId::Sale { key, id } => Some((*key, *id)),
                _ => None,
            })
            .collect()
    }
}

/// Filter for category lookups. An empty filter matches every category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub name: Option<String>,
}

impl CategoryFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn by_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }

    /// Returns whether a category with `name` passes the filter.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name.as_deref().is_none_or(|wanted| wanted == name)
    }
}

/// A persisted category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
}

/// A transactional unit of work over the retail schema.
///
/// `commit` takes every pending row: on success they are all durable, on
/// failure none of them are. `rollback` discards rows that were added but
/// not committed. Queries only see committed rows.
pub trait Session {
    /// Storage failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Buffers one row.
    fn add(&mut self, row: PendingRow);

    /// Buffers rows in order.
    fn add_all<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = PendingRow>,
    {
        for row in rows {
            self.add(row);
        }
    }

    /// Number of buffered rows.
    fn pending(&self) -> usize;

    /// Writes every buffered row atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any row cannot be written; nothing from this
    /// commit is then durable.
    fn commit(&mut self) -> Result<CommitReceipt, Self::Error>;

    /// Discards buffered rows.
    fn rollback(&mut self);

    /// Committed categories matching `filter`, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be queried.
    fn categories(&mut self, filter: &CategoryFilter) -> Result<Vec<CategoryRecord>, Self::Error>;

    /// Number of committed rows of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be queried.
    fn count(&mut self, kind: EntityKind) -> Result<u64, Self::Error>;
}
