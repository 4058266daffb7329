// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{EntityKind, Money};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A name is empty or otherwise unusable.
    InvalidName {
        /// The entity the name belongs to.
        entity: EntityKind,
        /// Why the name was rejected.
        reason: String,
    },
    /// An email address is malformed.
    InvalidEmail(String),
    /// A phone number is present but empty or malformed.
    InvalidPhone(String),
    /// A quantity must be a positive integer.
    InvalidQuantity(u32),
    /// A price must be strictly positive.
    NonPositivePrice(Money),
    /// A textual money amount could not be parsed.
    InvalidMoney(String),
    /// Identifier pool bounds are inverted or non-positive.
    InvalidPool {
        /// The first identifier of the pool.
        first: i64,
        /// The last identifier of the pool.
        last: i64,
    },
    /// An identifier falls outside its configured pool.
    IdentifierOutOfPool {
        /// The identifier that was rejected.
        id: i64,
        /// The first identifier of the pool.
        first: i64,
        /// The last identifier of the pool.
        last: i64,
    },
    /// A sale has no line items.
    EmptySale,
    /// A sale's recorded total does not match its line items.
    TotalMismatch {
        /// The total stored on the sale.
        recorded: Money,
        /// The sum of quantity × unit price over the line items.
        computed: Money,
    },
    /// A money computation overflowed.
    AmountOverflow,
    /// A payment method string is not recognised.
    InvalidPaymentMethod(String),
    /// A payment status string is not recognised.
    InvalidPaymentStatus(String),
    /// An entity kind string is not recognised.
    InvalidEntityKind(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { entity, reason } => {
                write!(f, "Invalid {entity} name: {reason}")
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{email}'"),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: '{phone}'"),
            Self::InvalidQuantity(qty) => {
                write!(f, "Invalid quantity {qty}: must be a positive integer")
            }
            Self::NonPositivePrice(price) => {
                write!(f, "Invalid price {price}: must be greater than zero")
            }
            Self::InvalidMoney(raw) => write!(f, "Invalid money amount: '{raw}'"),
            Self::InvalidPool { first, last } => {
                write!(
                    f,
                    "Invalid identifier pool [{first}, {last}]: bounds must be positive and ordered"
                )
            }
            Self::IdentifierOutOfPool { id, first, last } => {
                write!(f, "Identifier {id} is outside the pool [{first}, {last}]")
            }
            Self::EmptySale => write!(f, "A sale must have at least one line item"),
            Self::TotalMismatch { recorded, computed } => {
                write!(
                    f,
                    "Sale total {recorded} does not match the line item sum {computed}"
                )
            }
            Self::AmountOverflow => write!(f, "Money amount overflowed"),
            Self::InvalidPaymentMethod(raw) => write!(f, "Invalid payment method: '{raw}'"),
            Self::InvalidPaymentStatus(raw) => write!(f, "Invalid payment status: '{raw}'"),
            Self::InvalidEntityKind(raw) => write!(f, "Invalid entity kind: '{raw}'"),
        }
    }
}

impl std::error::Error for DomainError {}
