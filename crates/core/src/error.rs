// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use retail_analytics_domain::{DomainError, EntityKind, ProductId};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Errors raised while seeding or generating data.
///
/// Every variant aborts the run. Nothing is retried.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A sampler produced an identifier outside its configured pool.
    #[error("Sampled {kind} identifier is out of range: {source}")]
    IdentifierOutOfPool {
        kind: EntityKind,
        source: DomainError,
    },

    /// A sampler returned the wrong number of products for a sale.
    #[error("Expected {expected} products for a sale, sampler returned {actual}")]
    ProductSampleSize { expected: usize, actual: usize },

    /// A sampler returned the same product twice for one sale.
    #[error("Product {product} was sampled twice for the same sale")]
    DuplicateProductInSale { product: ProductId },

    /// A running total overflowed.
    #[error("Sale total overflowed")]
    TotalOverflow,

    /// Reference data does not cover what the generator will reference.
    #[error("Found {found} {kind} rows but the generator needs at least {required}")]
    MissingReferenceData {
        kind: EntityKind,
        found: u64,
        required: u64,
    },

    /// Stores cannot be seeded without regions.
    #[error("Cannot assign stores to regions: no regions available")]
    NoRegions,

    /// A storage operation failed outside a batch commit.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A batch commit failed; earlier batches stay durable.
    #[error(
        "Batch '{batch}' (position {position}) failed after {committed} committed batches: {source}"
    )]
    BatchFailed {
        batch: &'static str,
        position: usize,
        committed: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Storage did not return an identifier for a row it just committed.
    #[error("Storage did not assign an identifier for {0}")]
    MissingAssignedId(String),

    /// A day offset reached before the start of representable time.
    #[error("Day offset {0} is out of range")]
    DateOverflow(u32),
}

impl GeneratorError {
    /// Wraps a session error raised outside a batch commit.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}
