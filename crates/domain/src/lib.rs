// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod pool;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use pool::IdentifierPool;
pub use types::{
    Category, CategoryId, Customer, CustomerId, EntityKind, Money, Payment, PaymentMethod,
    PaymentStatus, Product, ProductId, Quantity, Region, RegionId, Sale, SaleId, SaleLineItem,
    Salesperson, SalespersonId, Store, StoreId,
};
pub use validation::{
    line_items_total, validate_customer, validate_email, validate_name, validate_product,
    validate_sale, validate_salesperson, validate_store,
};
