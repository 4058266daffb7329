// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data inserts: regions, categories, stores and products.
//!
//! Each insert returns the identifier `SQLite` assigned to the new row.

use diesel::prelude::*;
use diesel::SqliteConnection;
use retail_analytics_domain::{
    Category, CategoryId, Product, ProductId, Region, RegionId, Store, StoreId,
};

use crate::data_models::{NewCategory, NewProduct, NewRegion, NewStore, format_date};
use crate::diesel_schema::{categories, products, regions, stores};
use crate::error::PersistenceError;

/// Inserts a region.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_region(
    conn: &mut SqliteConnection,
    region: &Region,
) -> Result<RegionId, PersistenceError> {
    diesel::insert_into(regions::table)
        .values(&NewRegion { name: &region.name })
        .returning(regions::region_id)
        .get_result::<i64>(conn)
        .map(RegionId::new)
        .map_err(PersistenceError::from)
}

/// Inserts a category. Names are unique, so a repeated name fails.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_category(
    conn: &mut SqliteConnection,
    category: &Category,
) -> Result<CategoryId, PersistenceError> {
    diesel::insert_into(categories::table)
        .values(&NewCategory {
            name: &category.name,
        })
        .returning(categories::category_id)
        .get_result::<i64>(conn)
        .map(CategoryId::new)
        .map_err(PersistenceError::from)
}

/// Inserts a store.
///
/// # Errors
///
/// Returns an error if the region does not exist or the insert fails.
pub fn insert_store(
    conn: &mut SqliteConnection,
    store: &Store,
) -> Result<StoreId, PersistenceError> {
    diesel::insert_into(stores::table)
        .values(&NewStore {
            name: &store.name,
            region_id: store.region_id.value(),
            created_on: format_date(store.created_on)?,
        })
        .returning(stores::store_id)
        .get_result::<i64>(conn)
        .map(StoreId::new)
        .map_err(PersistenceError::from)
}

/// Inserts a product.
///
/// # Errors
///
/// Returns an error if the category does not exist or the insert fails.
pub fn insert_product(
    conn: &mut SqliteConnection,
    product: &Product,
) -> Result<ProductId, PersistenceError> {
    diesel::insert_into(products::table)
        .values(&NewProduct {
            name: &product.name,
            category_id: product.category_id.value(),
            price_cents: product.price.cents(),
            created_on: format_date(product.created_on)?,
        })
        .returning(products::product_id)
        .get_result::<i64>(conn)
        .map(ProductId::new)
        .map_err(PersistenceError::from)
}
