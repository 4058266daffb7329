// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting queries over generated sales.
//!
//! The listing and detail queries back the text reports of the CLI. The
//! audit queries check the two properties storage does not enforce by
//! itself: cached sale totals and (with enforcement off) sale references.

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;
use retail_analytics_domain::{Money, Payment, ProductId, Quantity, SaleId, SalespersonId, StoreId};
use tracing::debug;

use super::{count_to_u64, page_bounds};
use crate::data_models::{
    SaleDetail, SaleItemDetail, SaleSummary, SalesPage, TotalMismatch, parse_timestamp,
};
use crate::diesel_schema::{
    customers, payments, products, sale_line_items, sales, salespeople, stores,
};
use crate::error::PersistenceError;

/// Default number of sales per page.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// `(sale_id, customer, salesperson, salesperson_id, store, store_id, total_cents, sold_at)`
type SummaryRow = (i64, String, String, i64, String, i64, i64, String);

/// Result row of the total audit.
#[derive(QueryableByName)]
struct TotalAuditRow {
    #[diesel(sql_type = BigInt)]
    sale_id: i64,
    #[diesel(sql_type = BigInt)]
    recorded_cents: i64,
    #[diesel(sql_type = BigInt)]
    computed_cents: i64,
}

fn summary_from_row(row: SummaryRow) -> Result<SaleSummary, PersistenceError> {
    let (id, customer, salesperson, salesperson_id, store, store_id, total_cents, sold_at) = row;
    Ok(SaleSummary {
        id: SaleId::new(id),
        customer,
        salesperson,
        salesperson_id: SalespersonId::new(salesperson_id),
        store,
        store_id: StoreId::new(store_id),
        total: Money::from_cents(total_cents),
        sold_at: parse_timestamp(&sold_at)?,
    })
}

/// Returns the number of pages needed for `total` rows; at least 1.
#[must_use]
pub const fn page_count(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 1;
    }
    let pages: u64 = total.div_ceil(per_page);
    if pages == 0 { 1 } else { pages }
}

/// Lists one page of sales joined with customer, salesperson and store names.
///
/// Pages are 1-based and ordered by sale id. A page past the end is empty
/// but still reports the real totals.
///
/// # Errors
///
/// Returns an error if `page` or `per_page` is zero, or the database cannot
/// be queried.
pub fn list_sales_page(
    conn: &mut SqliteConnection,
    page: u64,
    per_page: u64,
) -> Result<SalesPage, PersistenceError> {
    let (limit, offset): (i64, i64) = page_bounds(page, per_page)?;

    let total: i64 = sales::table
        .inner_join(customers::table.on(sales::customer_id.eq(customers::customer_id)))
        .inner_join(salespeople::table.on(sales::salesperson_id.eq(salespeople::salesperson_id)))
        .inner_join(stores::table.on(sales::store_id.eq(stores::store_id)))
        .count()
        .get_result(conn)?;
    let total_sales: u64 = count_to_u64(total)?;

    let rows: Vec<SummaryRow> = sales::table
        .inner_join(customers::table.on(sales::customer_id.eq(customers::customer_id)))
        .inner_join(salespeople::table.on(sales::salesperson_id.eq(salespeople::salesperson_id)))
        .inner_join(stores::table.on(sales::store_id.eq(stores::store_id)))
        .order(sales::sale_id.asc())
        .limit(limit)
        .offset(offset)
        .select((
            sales::sale_id,
            customers::name,
            salespeople::name,
            sales::salesperson_id,
            stores::name,
            sales::store_id,
            sales::total_cents,
            sales::sold_at,
        ))
        .load::<SummaryRow>(conn)?;

    let sales: Vec<SaleSummary> = rows
        .into_iter()
        .map(summary_from_row)
        .collect::<Result<_, _>>()?;

    debug!(page, per_page, total_sales, rows = sales.len(), "Loaded sales page");

    Ok(SalesPage {
        sales,
        page,
        per_page,
        total_sales,
        total_pages: page_count(total_sales, per_page),
    })
}

/// Loads one sale with its line items and payment.
///
/// Line items come in insertion order, each joined to its product name and
/// carrying its `quantity × unit price` subtotal.
///
/// # Errors
///
/// Returns `SaleNotFound` if no sale has this id, or an error if the
/// database cannot be queried or holds a value outside its domain.
pub fn get_sale_detail(
    conn: &mut SqliteConnection,
    sale_id: SaleId,
) -> Result<SaleDetail, PersistenceError> {
    let row: Option<SummaryRow> = sales::table
        .inner_join(customers::table.on(sales::customer_id.eq(customers::customer_id)))
        .inner_join(salespeople::table.on(sales::salesperson_id.eq(salespeople::salesperson_id)))
        .inner_join(stores::table.on(sales::store_id.eq(stores::store_id)))
        .filter(sales::sale_id.eq(sale_id.value()))
        .select((
            sales::sale_id,
            customers::name,
            salespeople::name,
            sales::salesperson_id,
            stores::name,
            sales::store_id,
            sales::total_cents,
            sales::sold_at,
        ))
        .first::<SummaryRow>(conn)
        .optional()?;
    let summary: SaleSummary =
        summary_from_row(row.ok_or(PersistenceError::SaleNotFound(sale_id.value()))?)?;

    let item_rows: Vec<(i64, String, i32, i64)> = sale_line_items::table
        .inner_join(products::table.on(sale_line_items::product_id.eq(products::product_id)))
        .filter(sale_line_items::sale_id.eq(sale_id.value()))
        .order(sale_line_items::line_item_id.asc())
        .select((
            sale_line_items::product_id,
            products::name,
            sale_line_items::quantity,
            sale_line_items::unit_price_cents,
        ))
        .load::<(i64, String, i32, i64)>(conn)?;

    let mut items: Vec<SaleItemDetail> = Vec::with_capacity(item_rows.len());
    for (product_id, product, quantity, unit_price_cents) in item_rows {
        let units: u32 = quantity.to_u32().ok_or_else(|| {
            PersistenceError::SerializationError(format!("Negative quantity {quantity}"))
        })?;
        let quantity: Quantity = Quantity::new(units)?;
        let unit_price: Money = Money::from_cents(unit_price_cents);
        let subtotal: Money = unit_price.checked_times(quantity).ok_or_else(|| {
            PersistenceError::SerializationError(format!(
                "Subtotal overflow on sale {sale_id}, product {product_id}"
            ))
        })?;
        items.push(SaleItemDetail {
            product_id: ProductId::new(product_id),
            product,
            quantity,
            unit_price,
            subtotal,
        });
    }

    let payment_row: Option<(String, String, String)> = payments::table
        .filter(payments::sale_id.eq(sale_id.value()))
        .order(payments::payment_id.asc())
        .select((payments::method, payments::status, payments::created_at))
        .first::<(String, String, String)>(conn)
        .optional()?;
    let payment: Option<Payment> = match payment_row {
        Some((method, status, created_at)) => Some(Payment {
            method: method.parse()?,
            status: status.parse()?,
            created_at: parse_timestamp(&created_at)?,
        }),
        None => None,
    };

    Ok(SaleDetail {
        summary,
        items,
        payment,
    })
}

/// Finds sales whose cached total differs from the sum of their line items.
///
/// A sale without line items counts as summing to zero.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_inconsistent_sale_totals(
    conn: &mut SqliteConnection,
) -> Result<Vec<TotalMismatch>, PersistenceError> {
    // NOTE: raw SQL (justified - Diesel cannot multiply an Integer column by a BigInt column)
    let rows: Vec<TotalAuditRow> = diesel::sql_query(
        "SELECT s.sale_id AS sale_id, \
                s.total_cents AS recorded_cents, \
                COALESCE(SUM(li.quantity * li.unit_price_cents), 0) AS computed_cents \
         FROM sales s \
         LEFT JOIN sale_line_items li ON li.sale_id = s.sale_id \
         GROUP BY s.sale_id, s.total_cents \
         HAVING s.total_cents <> COALESCE(SUM(li.quantity * li.unit_price_cents), 0) \
         ORDER BY s.sale_id",
    )
    .load::<TotalAuditRow>(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| TotalMismatch {
            sale_id: SaleId::new(row.sale_id),
            recorded: Money::from_cents(row.recorded_cents),
            computed: Money::from_cents(row.computed_cents),
        })
        .collect())
}

/// Counts sales whose customer, salesperson or store does not exist.
///
/// Foreign key enforcement keeps this at zero; the count is an audit of
/// databases written with enforcement off.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_dangling_sale_references(
    conn: &mut SqliteConnection,
) -> Result<u64, PersistenceError> {
    let count: i64 = sales::table
        .left_join(customers::table.on(sales::customer_id.eq(customers::customer_id)))
        .left_join(salespeople::table.on(sales::salesperson_id.eq(salespeople::salesperson_id)))
        .left_join(stores::table.on(sales::store_id.eq(stores::store_id)))
        .filter(
            customers::customer_id
                .nullable()
                .is_null()
                .or(salespeople::salesperson_id.nullable().is_null())
                .or(stores::store_id.nullable().is_null()),
        )
        .count()
        .get_result(conn)?;
    count_to_u64(count)
}
