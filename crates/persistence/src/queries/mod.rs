// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `catalog`: category lookups used by the seeder
//! - `counts`: per-table row counts
//! - `listings`: paged customer, product and store listings
//! - `reports`: paged sales listing, sale detail and consistency audits

pub mod catalog;
pub mod counts;
pub mod listings;
pub mod reports;

use num_traits::ToPrimitive;

use crate::error::PersistenceError;

/// Converts a SQL count to `u64`.
fn count_to_u64(count: i64) -> Result<u64, PersistenceError> {
    count
        .to_u64()
        .ok_or_else(|| PersistenceError::DatabaseError("Count conversion failed".to_string()))
}

/// Turns a 1-based page request into SQL `(limit, offset)`.
fn page_bounds(page: u64, per_page: u64) -> Result<(i64, i64), PersistenceError> {
    let invalid = || PersistenceError::InvalidPage { page, per_page };
    if page == 0 || per_page == 0 {
        return Err(invalid());
    }
    let limit: i64 = per_page.to_i64().ok_or_else(invalid)?;
    let offset: i64 = (page - 1)
        .checked_mul(per_page)
        .and_then(|offset| offset.to_i64())
        .ok_or_else(invalid)?;
    Ok((limit, offset))
}
