// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use retail_analytics_domain::{
    CategoryId, CustomerId, Money, Payment, ProductId, Quantity, RegionId, SaleId, SalespersonId,
    StoreId,
};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

use crate::diesel_schema::{
    categories, customers, payments, products, regions, sale_line_items, sales, salespeople,
    stores,
};
use crate::error::PersistenceError;

/// Storage format of calendar dates.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Storage format of timestamps.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Formats a date for a `TEXT` column.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    Ok(date.format(DATE_FORMAT)?)
}

/// Formats a timestamp for a `TEXT` column.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(timestamp: PrimitiveDateTime) -> Result<String, PersistenceError> {
    Ok(timestamp.format(TIMESTAMP_FORMAT)?)
}

/// Parses a timestamp read from a `TEXT` column.
///
/// # Errors
///
/// Returns an error if the text is not in the storage format.
pub fn parse_timestamp(text: &str) -> Result<PrimitiveDateTime, PersistenceError> {
    Ok(PrimitiveDateTime::parse(text, TIMESTAMP_FORMAT)?)
}

#[derive(Insertable)]
#[diesel(table_name = regions)]
pub struct NewRegion<'a> {
    pub name: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategory<'a> {
    pub name: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = stores)]
pub struct NewStore<'a> {
    pub name: &'a str,
    pub region_id: i64,
    pub created_on: String,
}

#[derive(Insertable)]
#[diesel(table_name = products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub category_id: i64,
    pub price_cents: i64,
    pub created_on: String,
}

#[derive(Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomer<'a> {
    pub customer_id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub created_on: String,
}

#[derive(Insertable)]
#[diesel(table_name = salespeople)]
pub struct NewSalesperson<'a> {
    pub salesperson_id: i64,
    pub name: &'a str,
    pub store_id: i64,
    pub created_on: String,
}

#[derive(Insertable)]
#[diesel(table_name = sales)]
pub struct NewSale {
    pub customer_id: i64,
    pub salesperson_id: i64,
    pub store_id: i64,
    pub sold_at: String,
    pub total_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = sale_line_items)]
pub struct NewSaleLineItem {
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = payments)]
pub struct NewPayment {
    pub sale_id: i64,
    pub method: &'static str,
    pub status: &'static str,
    pub created_at: String,
}

/// One row of the paged sales listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleSummary {
    pub id: SaleId,
    pub customer: String,
    pub salesperson: String,
    pub salesperson_id: SalespersonId,
    pub store: String,
    pub store_id: StoreId,
    pub total: Money,
    pub sold_at: PrimitiveDateTime,
}

/// One page of sales, ordered by sale id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesPage {
    pub sales: Vec<SaleSummary>,
    /// 1-based page number.
    pub page: u64,
    pub per_page: u64,
    pub total_sales: u64,
    /// Never less than 1, even for an empty table.
    pub total_pages: u64,
}

/// A line item joined to its product name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleItemDetail {
    pub product_id: ProductId,
    pub product: String,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// A sale header with its line items and payment, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDetail {
    pub summary: SaleSummary,
    pub items: Vec<SaleItemDetail>,
    pub payment: Option<Payment>,
}

/// A sale whose cached total no longer matches its line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalMismatch {
    pub sale_id: SaleId,
    pub recorded: Money,
    pub computed: Money,
}

/// One page of a listing ordered by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    /// Never less than 1, even for an empty table.
    pub total_pages: u64,
}

/// A customer as listed by the `customers` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerListing {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A product joined to its category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    pub category: String,
    pub price: Money,
}

/// A store joined to its region name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreListing {
    pub id: StoreId,
    pub name: String,
    pub region_id: RegionId,
    pub region: String,
}
