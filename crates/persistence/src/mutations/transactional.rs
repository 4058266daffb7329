// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional data inserts: customers, salespeople, sales, line items
//! and payments.

use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;
use retail_analytics_domain::{Customer, Payment, Sale, SaleId, SaleLineItem, Salesperson};
use tracing::debug;

use crate::data_models::{
    NewCustomer, NewPayment, NewSale, NewSaleLineItem, NewSalesperson, format_date,
    format_timestamp,
};
use crate::diesel_schema::{customers, payments, sale_line_items, sales, salespeople};
use crate::error::PersistenceError;

/// Rows per multi-row `INSERT`.
pub const INSERT_CHUNK: usize = 500;

/// Inserts a customer under its generator-assigned identifier.
///
/// # Errors
///
/// Returns an error if the identifier is already taken or the insert fails.
pub fn insert_customer(
    conn: &mut SqliteConnection,
    customer: &Customer,
) -> Result<(), PersistenceError> {
    diesel::insert_into(customers::table)
        .values(&NewCustomer {
            customer_id: customer.id.value(),
            name: &customer.name,
            email: &customer.email,
            phone: customer.phone.as_deref(),
            created_on: format_date(customer.created_on)?,
        })
        .execute(conn)?;
    Ok(())
}

/// Inserts a salesperson under its generator-assigned identifier.
///
/// # Errors
///
/// Returns an error if the identifier is already taken, the store does not
/// exist, or the insert fails.
pub fn insert_salesperson(
    conn: &mut SqliteConnection,
    salesperson: &Salesperson,
) -> Result<(), PersistenceError> {
    diesel::insert_into(salespeople::table)
        .values(&NewSalesperson {
            salesperson_id: salesperson.id.value(),
            name: &salesperson.name,
            store_id: salesperson.store_id.value(),
            created_on: format_date(salesperson.created_on)?,
        })
        .execute(conn)?;
    Ok(())
}

/// Inserts a sale header and returns its identifier.
///
/// # Errors
///
/// Returns an error if a referenced customer, salesperson or store does not
/// exist, or the insert fails.
pub fn insert_sale(conn: &mut SqliteConnection, sale: &Sale) -> Result<SaleId, PersistenceError> {
    diesel::insert_into(sales::table)
        .values(&NewSale {
            customer_id: sale.customer_id.value(),
            salesperson_id: sale.salesperson_id.value(),
            store_id: sale.store_id.value(),
            sold_at: format_timestamp(sale.sold_at)?,
            total_cents: sale.total.cents(),
        })
        .returning(sales::sale_id)
        .get_result::<i64>(conn)
        .map(SaleId::new)
        .map_err(PersistenceError::from)
}

/// Builds the insert row of a line item owned by `sale_id`.
///
/// # Errors
///
/// Returns an error if the quantity does not fit the `quantity` column.
pub fn line_item_row(
    sale_id: SaleId,
    item: &SaleLineItem,
) -> Result<NewSaleLineItem, PersistenceError> {
    let quantity: i32 = item.quantity.get().to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("Quantity {} out of range", item.quantity))
    })?;

    Ok(NewSaleLineItem {
        sale_id: sale_id.value(),
        product_id: item.product_id.value(),
        quantity,
        unit_price_cents: item.unit_price.cents(),
    })
}

/// Builds the insert row of a payment owned by `sale_id`.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn payment_row(sale_id: SaleId, payment: &Payment) -> Result<NewPayment, PersistenceError> {
    Ok(NewPayment {
        sale_id: sale_id.value(),
        method: payment.method.as_str(),
        status: payment.status.as_str(),
        created_at: format_timestamp(payment.created_at)?,
    })
}

/// Inserts line items in chunks of [`INSERT_CHUNK`] rows.
///
/// # Errors
///
/// Returns an error if a referenced sale or product does not exist, or an
/// insert fails.
pub fn insert_line_items(
    conn: &mut SqliteConnection,
    rows: &[NewSaleLineItem],
) -> Result<usize, PersistenceError> {
    let mut inserted: usize = 0;
    for chunk in rows.chunks(INSERT_CHUNK) {
        inserted += diesel::insert_into(sale_line_items::table)
            .values(chunk)
            .execute(conn)?;
    }
    if inserted > 0 {
        debug!(rows = inserted, "Inserted sale line items");
    }
    Ok(inserted)
}

/// Inserts payments in chunks of [`INSERT_CHUNK`] rows.
///
/// # Errors
///
/// Returns an error if a referenced sale does not exist or an insert fails.
pub fn insert_payments(
    conn: &mut SqliteConnection,
    rows: &[NewPayment],
) -> Result<usize, PersistenceError> {
    let mut inserted: usize = 0;
    for chunk in rows.chunks(INSERT_CHUNK) {
        inserted += diesel::insert_into(payments::table)
            .values(chunk)
            .execute(conn)?;
    }
    if inserted > 0 {
        debug!(rows = inserted, "Inserted payments");
    }
    Ok(inserted)
}
