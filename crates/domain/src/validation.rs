// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level checks on entity values.
//!
//! These mirror the presence/shape rules a CRUD schema layer would apply.
//! They never touch storage, so referential checks live elsewhere.

use crate::error::DomainError;
use crate::types::{
    Customer, EntityKind, Money, Product, Sale, SaleLineItem, Salesperson, Store,
};

const MAX_NAME_LEN: usize = 200;

/// Validates that a name is present and of reasonable length.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank or too long.
pub fn validate_name(entity: EntityKind, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName {
            entity,
            reason: String::from("Name cannot be empty"),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidName {
            entity,
            reason: format!("Name cannot exceed {MAX_NAME_LEN} characters"),
        });
    }

    Ok(())
}

/// Validates the shape of an email address: `local@domain.tld`, no whitespace.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidEmail(email.to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    // Rule: the domain needs a dot with a label on both sides
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

fn validate_phone(phone: &str) -> Result<(), DomainError> {
    let digits: usize = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')');

    if digits < 8 || !phone.chars().all(allowed) {
        return Err(DomainError::InvalidPhone(phone.to_string()));
    }
    Ok(())
}

/// Validates a customer's fields.
///
/// # Errors
///
/// Returns an error if the name, email or phone is malformed.
pub fn validate_customer(customer: &Customer) -> Result<(), DomainError> {
    validate_name(EntityKind::Customer, &customer.name)?;
    validate_email(&customer.email)?;
    if let Some(phone) = &customer.phone {
        validate_phone(phone)?;
    }
    Ok(())
}

/// Validates a salesperson's fields.
///
/// # Errors
///
/// Returns an error if the name is malformed.
pub fn validate_salesperson(salesperson: &Salesperson) -> Result<(), DomainError> {
    validate_name(EntityKind::Salesperson, &salesperson.name)
}

/// Validates a store's fields.
///
/// # Errors
///
/// Returns an error if the name is malformed.
pub fn validate_store(store: &Store) -> Result<(), DomainError> {
    validate_name(EntityKind::Store, &store.name)
}

/// Validates a product's fields.
///
/// # Errors
///
/// Returns an error if the name is malformed or the price is not positive.
pub fn validate_product(product: &Product) -> Result<(), DomainError> {
    validate_name(EntityKind::Product, &product.name)?;
    if !product.price.is_positive() {
        return Err(DomainError::NonPositivePrice(product.price));
    }
    Ok(())
}

/// Sums `quantity × unit_price` over line items.
///
/// # Errors
///
/// Returns `DomainError::AmountOverflow` if the sum does not fit.
pub fn line_items_total(items: &[SaleLineItem]) -> Result<Money, DomainError> {
    items.iter().try_fold(Money::ZERO, |acc, item| {
        item.subtotal()
            .and_then(|subtotal| acc.checked_add(subtotal))
            .ok_or(DomainError::AmountOverflow)
    })
}

/// Validates a sale against its line items.
///
/// # Errors
///
/// Returns an error if the sale has no items, an item has a non-positive
/// price, or the recorded total differs from the line item sum.
pub fn validate_sale(sale: &Sale, items: &[SaleLineItem]) -> Result<(), DomainError> {
    if items.is_empty() {
        return Err(DomainError::EmptySale);
    }

    if let Some(item) = items.iter().find(|item| !item.unit_price.is_positive()) {
        return Err(DomainError::NonPositivePrice(item.unit_price));
    }

    let computed: Money = line_items_total(items)?;
    if computed != sale.total {
        return Err(DomainError::TotalMismatch {
            recorded: sale.total,
            computed,
        });
    }

    Ok(())
}
