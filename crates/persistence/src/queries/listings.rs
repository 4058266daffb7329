// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Paged listings of the reference and customer tables.

use diesel::prelude::*;
use diesel::SqliteConnection;
use retail_analytics_domain::{CategoryId, CustomerId, Money, ProductId, RegionId, StoreId};
use tracing::debug;

use super::{count_to_u64, page_bounds};
use crate::data_models::{CustomerListing, Page, ProductListing, StoreListing};
use crate::diesel_schema::{categories, customers, products, regions, stores};
use crate::error::PersistenceError;
use crate::queries::reports::page_count;

fn into_page<T>(items: Vec<T>, page: u64, per_page: u64, total: u64) -> Page<T> {
    Page {
        items,
        page,
        per_page,
        total,
        total_pages: page_count(total, per_page),
    }
}

/// Lists one 1-based page of customers ordered by id.
///
/// # Errors
///
/// Returns an error if `page` or `per_page` is zero, or the database cannot
/// be queried.
pub fn list_customers(
    conn: &mut SqliteConnection,
    page: u64,
    per_page: u64,
) -> Result<Page<CustomerListing>, PersistenceError> {
    let (limit, offset): (i64, i64) = page_bounds(page, per_page)?;
    let total: u64 = count_to_u64(customers::table.count().get_result(conn)?)?;

    let rows: Vec<(i64, String, String, Option<String>)> = customers::table
        .order(customers::customer_id.asc())
        .limit(limit)
        .offset(offset)
        .select((
            customers::customer_id,
            customers::name,
            customers::email,
            customers::phone,
        ))
        .load(conn)?;

    let items: Vec<CustomerListing> = rows
        .into_iter()
        .map(|(id, name, email, phone)| CustomerListing {
            id: CustomerId::new(id),
            name,
            email,
            phone,
        })
        .collect();

    debug!(page, per_page, total, rows = items.len(), "Loaded customers page");
    Ok(into_page(items, page, per_page, total))
}

/// Lists one 1-based page of products with their category names.
///
/// # Errors
///
/// Returns an error if `page` or `per_page` is zero, or the database cannot
/// be queried.
pub fn list_products(
    conn: &mut SqliteConnection,
    page: u64,
    per_page: u64,
) -> Result<Page<ProductListing>, PersistenceError> {
    let (limit, offset): (i64, i64) = page_bounds(page, per_page)?;
    let total: u64 = count_to_u64(products::table.count().get_result(conn)?)?;

    let rows: Vec<(i64, String, i64, String, i64)> = products::table
        .inner_join(categories::table.on(products::category_id.eq(categories::category_id)))
        .order(products::product_id.asc())
        .limit(limit)
        .offset(offset)
        .select((
            products::product_id,
            products::name,
            products::category_id,
            categories::name,
            products::price_cents,
        ))
        .load(conn)?;

    let items: Vec<ProductListing> = rows
        .into_iter()
        .map(|(id, name, category_id, category, price_cents)| ProductListing {
            id: ProductId::new(id),
            name,
            category_id: CategoryId::new(category_id),
            category,
            price: Money::from_cents(price_cents),
        })
        .collect();

    debug!(page, per_page, total, rows = items.len(), "Loaded products page");
    Ok(into_page(items, page, per_page, total))
}

/// Lists one 1-based page of stores with their region names.
///
/// # Errors
///
/// Returns an error if `page` or `per_page` is zero, or the database cannot
/// be queried.
pub fn list_stores(
    conn: &mut SqliteConnection,
    page: u64,
    per_page: u64,
) -> Result<Page<StoreListing>, PersistenceError> {
    let (limit, offset): (i64, i64) = page_bounds(page, per_page)?;
    let total: u64 = count_to_u64(stores::table.count().get_result(conn)?)?;

    let rows: Vec<(i64, String, i64, String)> = stores::table
        .inner_join(regions::table.on(stores::region_id.eq(regions::region_id)))
        .order(stores::store_id.asc())
        .limit(limit)
        .offset(offset)
        .select((stores::store_id, stores::name, stores::region_id, regions::name))
        .load(conn)?;

    let items: Vec<StoreListing> = rows
        .into_iter()
        .map(|(id, name, region_id, region)| StoreListing {
            id: StoreId::new(id),
            name,
            region_id: RegionId::new(region_id),
            region,
        })
        .collect();

    debug!(page, per_page, total, rows = items.len(), "Loaded stores page");
    Ok(into_page(items, page, per_page, total))
}
