// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A closed range `[first, last]` of entity identifiers.
///
/// The generator samples customer, salesperson and product identifiers
/// from pools so that the same identifier can recur within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PoolBounds", into = "PoolBounds")]
pub struct IdentifierPool {
    first: i64,
    last: i64,
}

#[derive(Serialize, Deserialize)]
struct PoolBounds {
    first: i64,
    last: i64,
}

impl IdentifierPool {
    /// Creates a pool covering `first..=last`.
    ///
    /// # Errors
    ///
    /// Returns an error if `first` is not positive or `first > last`.
    pub const fn new(first: i64, last: i64) -> Result<Self, DomainError> {
        match Self::bounded(first, last) {
            Some(pool) => Ok(pool),
            None => Err(DomainError::InvalidPool { first, last }),
        }
    }

    /// Like [`IdentifierPool::new`], returning `None` for invalid bounds.
    #[must_use]
    pub const fn bounded(first: i64, last: i64) -> Option<Self> {
        if first < 1 || first > last {
            return None;
        }
        Some(Self { first, last })
    }

    /// The lowest identifier in the pool.
    #[must_use]
    pub const fn first(&self) -> i64 {
        self.first
    }

    /// The highest identifier in the pool.
    #[must_use]
    pub const fn last(&self) -> i64 {
        self.last
    }

    /// Number of identifiers in the pool.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.last.abs_diff(self.first) + 1
    }

    /// A pool always holds at least one identifier.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns whether `id` belongs to the pool.
    #[must_use]
    pub const fn contains(&self, id: i64) -> bool {
        id >= self.first && id <= self.last
    }

    /// Returns `id` unchanged if it belongs to the pool.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IdentifierOutOfPool` otherwise.
    pub const fn check(&self, id: i64) -> Result<i64, DomainError> {
        if self.contains(id) {
            Ok(id)
        } else {
            Err(DomainError::IdentifierOutOfPool {
                id,
                first: self.first,
                last: self.last,
            })
        }
    }

    /// Returns the `index`-th identifier of the pool (0-based), if any.
    #[must_use]
    pub fn nth(&self, index: u64) -> Option<i64> {
        if index >= self.len() {
            return None;
        }
        i64::try_from(index)
            .ok()
            .and_then(|offset| self.first.checked_add(offset))
    }
}

impl TryFrom<PoolBounds> for IdentifierPool {
    type Error = DomainError;

    fn try_from(bounds: PoolBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.first, bounds.last)
    }
}

impl From<IdentifierPool> for PoolBounds {
    fn from(pool: IdentifierPool) -> Self {
        Self {
            first: pool.first,
            last: pool.last,
        }
    }
}

impl std::fmt::Display for IdentifierPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}
