// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{date, datetime};

use crate::{
    CategoryId, Customer, CustomerId, DomainError, EntityKind, Money, Product, ProductId,
    Quantity, Sale, SaleLineItem, SalespersonId, StoreId, line_items_total, validate_customer,
    validate_email, validate_name, validate_product, validate_sale,
};

fn create_test_customer() -> Customer {
    Customer {
        id: CustomerId::new(1),
        name: String::from("Ana Souza"),
        email: String::from("ana.souza@example.com"),
        phone: Some(String::from("+55 (11) 91234-5678")),
        created_on: date!(2021 - 05 - 10),
    }
}

fn create_test_items() -> Vec<SaleLineItem> {
    vec![
        SaleLineItem {
            product_id: ProductId::new(5),
            quantity: Quantity::new(2).unwrap(),
            unit_price: Money::from_cents(1000),
        },
        SaleLineItem {
            product_id: ProductId::new(12),
            quantity: Quantity::new(1).unwrap(),
            unit_price: Money::from_cents(2550),
        },
    ]
}

fn create_test_sale(total: Money) -> Sale {
    Sale {
        customer_id: CustomerId::new(1),
        salesperson_id: SalespersonId::new(1),
        store_id: StoreId::new(1),
        sold_at: datetime!(2026-01-15 14:00:00),
        total,
    }
}

#[test]
fn test_blank_name_is_rejected() {
    let result = validate_name(EntityKind::Store, "   ");
    assert!(matches!(
        result,
        Err(DomainError::InvalidName {
            entity: EntityKind::Store,
            ..
        })
    ));
}

#[test]
fn test_overlong_name_is_rejected() {
    let name: String = "x".repeat(201);
    assert!(validate_name(EntityKind::Product, &name).is_err());
    assert!(validate_name(EntityKind::Product, &name[..200]).is_ok());
}

#[test]
fn test_email_shapes() {
    assert!(validate_email("joao@loja.com.br").is_ok());
    for bad in [
        "",
        "joao",
        "@loja.com",
        "joao@",
        "joao@loja",
        "joao@loja.",
        "jo ao@loja.com",
        "a@b@c.com",
    ] {
        assert!(validate_email(bad).is_err(), "{bad} should be rejected");
    }
}

#[test]
fn test_valid_customer_passes() {
    assert!(validate_customer(&create_test_customer()).is_ok());
}

#[test]
fn test_customer_without_phone_passes() {
    let mut customer: Customer = create_test_customer();
    customer.phone = None;
    assert!(validate_customer(&customer).is_ok());
}

#[test]
fn test_customer_with_garbage_phone_fails() {
    let mut customer: Customer = create_test_customer();
    customer.phone = Some(String::from("call me"));
    assert!(matches!(
        validate_customer(&customer),
        Err(DomainError::InvalidPhone(_))
    ));
}

#[test]
fn test_product_price_must_be_positive() {
    let product = Product {
        name: String::from("Cadeira"),
        category_id: CategoryId::new(4),
        price: Money::ZERO,
        created_on: date!(2022 - 02 - 02),
    };
    assert_eq!(
        validate_product(&product),
        Err(DomainError::NonPositivePrice(Money::ZERO))
    );
}

#[test]
fn test_line_items_total_is_exact() {
    assert_eq!(
        line_items_total(&create_test_items()),
        Ok(Money::from_cents(4550))
    );
    assert_eq!(line_items_total(&[]), Ok(Money::ZERO));
}

#[test]
fn test_sale_with_matching_total_is_valid() {
    let sale: Sale = create_test_sale(Money::from_cents(4550));
    assert!(validate_sale(&sale, &create_test_items()).is_ok());
}

#[test]
fn test_sale_with_drifted_total_is_rejected() {
    let sale: Sale = create_test_sale(Money::from_cents(4500));
    assert_eq!(
        validate_sale(&sale, &create_test_items()),
        Err(DomainError::TotalMismatch {
            recorded: Money::from_cents(4500),
            computed: Money::from_cents(4550),
        })
    );
}

#[test]
fn test_sale_without_items_is_rejected() {
    let sale: Sale = create_test_sale(Money::ZERO);
    assert_eq!(validate_sale(&sale, &[]), Err(DomainError::EmptySale));
}
