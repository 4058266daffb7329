// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional-data generation.
//!
//! The generator walks a (store, day) grid. Every sale references a customer
//! and a salesperson drawn from identifier pools; the first time an
//! identifier is drawn its record is synthesized, later draws reuse it.
//! Nothing is written while the grid is walked: the result is persisted
//! afterwards in two phases, people first, then sales with their line items
//! and payments.

use std::collections::BTreeSet;

use retail_analytics_domain::{
    Customer, CustomerId, EntityKind, IdentifierPool, Money, Payment, ProductId, Quantity, Sale,
    SaleLineItem, Salesperson, SalespersonId, StoreId, validate_customer, validate_sale,
    validate_salesperson,
};
use time::{Date, Duration, PrimitiveDateTime};
use tracing::{debug, info};

use crate::arena::WorkingSet;
use crate::batch::{Batch, commit_in_order};
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::sampler::SalesSampler;
use crate::session::{CommitReceipt, PendingRow, SaleKey, Session};

/// Label of the first commit: customers, then salespeople.
pub const PEOPLE_BATCH: &str = "customers_and_salespeople";

/// Label of the second commit: sales, then line items, then payments.
pub const SALES_BATCH: &str = "sales_and_line_items";

/// A sale with its line items and optional payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSale {
    pub sale: Sale,
    pub items: Vec<SaleLineItem>,
    pub payment: Option<Payment>,
}

/// Everything one generation run produced, not yet persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSales {
    /// One record per distinct customer identifier, by identifier.
    pub customers: Vec<Customer>,
    /// One record per distinct salesperson identifier, by identifier.
    pub salespeople: Vec<Salesperson>,
    /// Sales in grid order (store, then day, then draw).
    pub sales: Vec<GeneratedSale>,
}

impl GeneratedSales {
    #[must_use]
    pub fn line_item_count(&self) -> usize {
        self.sales.iter().map(|sale| sale.items.len()).sum()
    }

    #[must_use]
    pub fn payment_count(&self) -> usize {
        self.sales.iter().filter(|sale| sale.payment.is_some()).count()
    }

    /// Splits the run into its two commits.
    ///
    /// The first batch holds customers then salespeople. The second holds
    /// every sale, then every line item, then every payment; line items and
    /// payments point at their sale through its position in `sales`.
    #[must_use]
    pub fn into_batches(self) -> Vec<Batch> {
        let mut people: Vec<PendingRow> =
            Vec::with_capacity(self.customers.len() + self.salespeople.len());
        people.extend(self.customers.into_iter().map(PendingRow::Customer));
        people.extend(self.salespeople.into_iter().map(PendingRow::Salesperson));

        let mut headers: Vec<PendingRow> = Vec::with_capacity(self.sales.len());
        let mut items: Vec<PendingRow> = Vec::new();
        let mut payments: Vec<PendingRow> = Vec::new();
        for (index, generated) in self.sales.into_iter().enumerate() {
            let key: SaleKey = SaleKey::new(index);
            headers.push(PendingRow::Sale {
                key,
                sale: generated.sale,
            });
            items.extend(
                generated
                    .items
                    .into_iter()
                    .map(|item| PendingRow::LineItem { sale: key, item }),
            );
            if let Some(payment) = generated.payment {
                payments.push(PendingRow::Payment { sale: key, payment });
            }
        }
        headers.append(&mut items);
        headers.append(&mut payments);

        vec![
            Batch::new(PEOPLE_BATCH, people),
            Batch::new(SALES_BATCH, headers),
        ]
    }
}

/// Row counts written by [`persist_sales`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistSummary {
    pub customers: usize,
    pub salespeople: usize,
    pub sales: usize,
    pub line_items: usize,
    pub payments: usize,
}

impl PersistSummary {
    fn from_receipts(receipts: &[CommitReceipt]) -> Self {
        let total = |kind: EntityKind| -> usize {
            receipts.iter().map(|receipt| receipt.count(kind)).sum()
        };
        Self {
            customers: total(EntityKind::Customer),
            salespeople: total(EntityKind::Salesperson),
            sales: total(EntityKind::Sale),
            line_items: total(EntityKind::SaleLineItem),
            payments: total(EntityKind::Payment),
        }
    }
}

fn checked_id(pool: IdentifierPool, kind: EntityKind, id: i64) -> Result<i64, GeneratorError> {
    pool.check(id)
        .map_err(|source| GeneratorError::IdentifierOutOfPool { kind, source })
}

fn synthesize_customer<P: SalesSampler>(
    sampler: &mut P,
    id: CustomerId,
    today: Date,
) -> Result<Customer, GeneratorError> {
    let name: String = sampler.person_name();
    let customer = Customer {
        id,
        email: sampler.email(&name),
        phone: sampler.phone(),
        created_on: sampler.date_this_decade(today),
        name,
    };
    validate_customer(&customer)?;
    Ok(customer)
}

fn synthesize_salesperson<P: SalesSampler>(
    sampler: &mut P,
    id: SalespersonId,
    store_id: StoreId,
    today: Date,
) -> Result<Salesperson, GeneratorError> {
    let salesperson = Salesperson {
        id,
        name: sampler.person_name(),
        store_id,
        created_on: sampler.date_this_decade(today),
    };
    validate_salesperson(&salesperson)?;
    Ok(salesperson)
}

/// Mutable state of one generation run.
struct Run<'a, P> {
    config: &'a GeneratorConfig,
    sampler: &'a mut P,
    today: Date,
    customers: WorkingSet<CustomerId, Customer>,
    salespeople: WorkingSet<SalespersonId, Salesperson>,
}

impl<P: SalesSampler> Run<'_, P> {
    fn sample_products(&mut self) -> Result<Vec<ProductId>, GeneratorError> {
        let expected: usize = usize::try_from(self.config.items_per_sale).unwrap_or(usize::MAX);
        let sampled: Vec<i64> = self.sampler.product_ids(self.config.items_per_sale);
        if sampled.len() != expected {
            return Err(GeneratorError::ProductSampleSize {
                expected,
                actual: sampled.len(),
            });
        }

        let mut seen: BTreeSet<i64> = BTreeSet::new();
        let mut products: Vec<ProductId> = Vec::with_capacity(expected);
        for raw in sampled {
            let id: i64 = checked_id(self.config.product_pool, EntityKind::Product, raw)?;
            if !seen.insert(id) {
                return Err(GeneratorError::DuplicateProductInSale {
                    product: ProductId::new(id),
                });
            }
            products.push(ProductId::new(id));
        }
        Ok(products)
    }

    fn generate_sale(
        &mut self,
        store_id: StoreId,
        sold_at: PrimitiveDateTime,
    ) -> Result<GeneratedSale, GeneratorError> {
        let customer_id = CustomerId::new(checked_id(
            self.config.customer_pool,
            EntityKind::Customer,
            self.sampler.customer_id(),
        )?);
        let salesperson_id = SalespersonId::new(checked_id(
            self.config.salesperson_pool,
            EntityKind::Salesperson,
            self.sampler.salesperson_id(),
        )?);
        let products: Vec<ProductId> = self.sample_products()?;

        let today: Date = self.today;
        let sampler = &mut *self.sampler;
        self.customers
            .get_or_try_insert_with(customer_id, |id| synthesize_customer(sampler, id, today))?;
        // A salesperson belongs to the store where they were first drawn
        self.salespeople.get_or_try_insert_with(salesperson_id, |id| {
            synthesize_salesperson(sampler, id, store_id, today)
        })?;

        let mut total: Money = Money::ZERO;
        let mut items: Vec<SaleLineItem> = Vec::with_capacity(products.len());
        for product_id in products {
            let unit_price: Money = self.sampler.unit_price();
            let quantity: Quantity = Quantity::new(self.sampler.quantity())?;
            let item = SaleLineItem {
                product_id,
                quantity,
                unit_price,
            };
            total = item
                .subtotal()
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or(GeneratorError::TotalOverflow)?;
            items.push(item);
        }

        // Total is assigned once every line item exists
        let sale = Sale {
            customer_id,
            salesperson_id,
            store_id,
            sold_at,
            total,
        };
        validate_sale(&sale, &items)?;

        let payment: Option<Payment> = self
            .config
            .payments
            .then(|| self.sampler.payment(sold_at));

        Ok(GeneratedSale {
            sale,
            items,
            payment,
        })
    }
}

/// Generates sales for stores `1..=store_count` over day offsets `0..days`
/// counted back from `now`.
///
/// Pure: nothing is written. Every identifier the sampler returns is checked
/// against its pool before it is used.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the sampler produces an
/// out-of-pool identifier, a duplicate or missing product, a zero quantity,
/// or a synthesized record fails validation.
pub fn generate_sales<P: SalesSampler>(
    config: &GeneratorConfig,
    sampler: &mut P,
    now: PrimitiveDateTime,
) -> Result<GeneratedSales, GeneratorError> {
    config.validate()?;
    info!(
        stores = config.store_count,
        days = config.days,
        payments = config.payments,
        "Generating sales"
    );

    let mut run = Run {
        config,
        sampler,
        today: now.date(),
        customers: WorkingSet::new(),
        salespeople: WorkingSet::new(),
    };

    let mut sales: Vec<GeneratedSale> = Vec::new();
    for store in 1..=config.store_count {
        let store_id = StoreId::new(i64::from(store));
        for day in 0..config.days {
            let sold_at: PrimitiveDateTime = now
                .checked_sub(Duration::days(i64::from(day)))
                .ok_or(GeneratorError::DateOverflow(day))?;
            let count: u32 = run.sampler.sales_per_day(store_id, day);
            debug!(
                store = %store_id,
                day,
                date = %sold_at.date(),
                sales = count,
                "Generating sales for store"
            );

            for _ in 0..count {
                sales.push(run.generate_sale(store_id, sold_at)?);
            }
        }
    }

    let generated = GeneratedSales {
        customers: run.customers.into_values().collect(),
        salespeople: run.salespeople.into_values().collect(),
        sales,
    };
    info!(
        sales = generated.sales.len(),
        line_items = generated.line_item_count(),
        customers = generated.customers.len(),
        salespeople = generated.salespeople.len(),
        payments = generated.payment_count(),
        "Generation complete"
    );
    Ok(generated)
}

/// Persists a run in two commits: people, then sales.
///
/// # Errors
///
/// Returns `GeneratorError::BatchFailed` if a commit fails. A failure in the
/// sales commit leaves no sale, line item or payment behind while the
/// people committed first stay durable.
pub fn persist_sales<S: Session>(
    session: &mut S,
    generated: GeneratedSales,
) -> Result<PersistSummary, GeneratorError> {
    let receipts: Vec<CommitReceipt> = commit_in_order(session, generated.into_batches())?;
    let summary: PersistSummary = PersistSummary::from_receipts(&receipts);
    info!(
        customers = summary.customers,
        salespeople = summary.salespeople,
        sales = summary.sales,
        line_items = summary.line_items,
        payments = summary.payments,
        "Sales persisted"
    );
    Ok(summary)
}

fn require<S: Session>(
    session: &mut S,
    kind: EntityKind,
    required: u64,
) -> Result<(), GeneratorError> {
    let found: u64 = session.count(kind).map_err(GeneratorError::storage)?;
    if found < required {
        return Err(GeneratorError::MissingReferenceData {
            kind,
            found,
            required,
        });
    }
    debug!(kind = %kind, found, required, "Reference data present");
    Ok(())
}

/// Checks that storage holds the stores and products the generator will
/// reference.
///
/// Stores and products carry auto-assigned identifiers starting at 1, so
/// `store_count` stores and `product_pool.last()` products must exist.
///
/// # Errors
///
/// Returns `GeneratorError::MissingReferenceData` if either table is short.
pub fn check_reference_data<S: Session>(
    session: &mut S,
    config: &GeneratorConfig,
) -> Result<(), GeneratorError> {
    require(session, EntityKind::Store, u64::from(config.store_count))?;
    require(
        session,
        EntityKind::Product,
        u64::try_from(config.product_pool.last()).unwrap_or(0),
    )
}

/// Validates, optionally checks reference data, generates and persists.
///
/// # Errors
///
/// Returns the first error raised by any step.
pub fn run_generation<S, P>(
    session: &mut S,
    config: &GeneratorConfig,
    sampler: &mut P,
    now: PrimitiveDateTime,
) -> Result<PersistSummary, GeneratorError>
where
    S: Session,
    P: SalesSampler,
{
    config.validate()?;
    if config.verify_references {
        check_reference_data(session, config)?;
    }
    let generated: GeneratedSales = generate_sales(config, sampler, now)?;
    persist_sales(session, generated)
}
