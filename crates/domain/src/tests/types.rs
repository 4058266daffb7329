// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use time::macros::datetime;

use crate::{
    CustomerId, DomainError, EntityKind, Money, Payment, PaymentMethod, PaymentStatus, ProductId,
    Quantity, SaleLineItem, StoreId,
};

#[test]
fn test_money_display_pads_cents() {
    assert_eq!(Money::from_cents(1005).to_string(), "10.05");
    assert_eq!(Money::from_cents(50000).to_string(), "500.00");
    assert_eq!(Money::from_cents(7).to_string(), "0.07");
    assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
}

#[test]
fn test_money_parses_up_to_two_decimals() {
    assert_eq!(Money::from_str("10").unwrap(), Money::from_cents(1000));
    assert_eq!(Money::from_str("10.5").unwrap(), Money::from_cents(1050));
    assert_eq!(Money::from_str("499.99").unwrap(), Money::from_cents(49_999));
    assert_eq!(Money::from_str("-1.25").unwrap(), Money::from_cents(-125));
}

#[test]
fn test_money_rejects_malformed_input() {
    for raw in ["", ".5", "1.234", "abc", "1.2.3", "12,50"] {
        assert_eq!(
            Money::from_str(raw),
            Err(DomainError::InvalidMoney(raw.to_string())),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn test_money_checked_arithmetic() {
    let price = Money::from_cents(1999);
    let qty = Quantity::new(3).unwrap();
    assert_eq!(price.checked_times(qty), Some(Money::from_cents(5997)));
    assert_eq!(
        Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)),
        None
    );
}

#[test]
fn test_quantity_must_be_positive() {
    assert_eq!(Quantity::new(0), Err(DomainError::InvalidQuantity(0)));
    assert_eq!(Quantity::new(5).unwrap().get(), 5);
}

#[test]
fn test_quantity_deserialization_rejects_zero() {
    let zero: Result<Quantity, _> = serde_json::from_str("0");
    assert!(zero.is_err());
    let two: Quantity = serde_json::from_str("2").unwrap();
    assert_eq!(two.get(), 2);
}

#[test]
fn test_line_item_subtotal() {
    let item = SaleLineItem {
        product_id: ProductId::new(12),
        quantity: Quantity::new(4).unwrap(),
        unit_price: Money::from_cents(2550),
    };
    assert_eq!(item.subtotal(), Some(Money::from_cents(10_200)));
}

#[test]
fn test_entity_ids_are_transparent() {
    let id = CustomerId::new(42);
    assert_eq!(id.value(), 42);
    assert_eq!(id.to_string(), "42");
    assert_eq!(serde_json::to_string(&StoreId::new(3)).unwrap(), "3");
}

#[test]
fn test_entity_kind_round_trips_through_str() {
    for kind in EntityKind::ALL {
        assert_eq!(EntityKind::from_str(kind.as_str()), Ok(kind));
    }
    assert!(EntityKind::from_str("invoice").is_err());
}

#[test]
fn test_entity_kind_order_is_dependency_order() {
    let position = |kind: EntityKind| EntityKind::ALL.iter().position(|k| *k == kind);
    assert!(position(EntityKind::Customer) < position(EntityKind::Sale));
    assert!(position(EntityKind::Sale) < position(EntityKind::SaleLineItem));
    assert!(position(EntityKind::Store) < position(EntityKind::Salesperson));
}

#[test]
fn test_payment_enums_parse() {
    for method in PaymentMethod::ALL {
        assert_eq!(PaymentMethod::from_str(method.as_str()), Ok(method));
    }
    assert_eq!(
        PaymentStatus::from_str("approved"),
        Ok(PaymentStatus::Approved)
    );
    assert!(PaymentStatus::from_str("refunded").is_err());
}

#[test]
fn test_payment_serializes_snake_case() {
    let payment = Payment {
        method: PaymentMethod::CreditCard,
        status: PaymentStatus::Pending,
        created_at: datetime!(2026-03-01 10:30:00),
    };
    let json: String = serde_json::to_string(&payment).unwrap();
    assert!(json.contains("\"credit_card\""));
    assert!(json.contains("\"pending\""));
}
