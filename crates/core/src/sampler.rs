// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sources of randomness for the seeder and the generator.
//!
//! The seeder and generator never touch a random number generator directly;
//! they ask a sampler. Tests script samplers to force exact outcomes.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, RngExt, SeedableRng};
use retail_analytics_domain::{
    IdentifierPool, Money, Payment, PaymentMethod, PaymentStatus, RegionId, StoreId,
};
use time::{Date, Duration, PrimitiveDateTime};

use crate::config::{GeneratorConfig, SampleRange, SeedConfig};
use crate::faker;

/// Fake personal and company data.
pub trait FakeData {
    fn person_name(&mut self) -> String;

    /// An email address for a person called `name`.
    fn email(&mut self, name: &str) -> String;

    /// A phone number, or `None` when the person has none on file.
    fn phone(&mut self) -> Option<String>;

    fn company_name(&mut self) -> String;

    /// A date between the start of the current decade and `today`.
    fn date_this_decade(&mut self, today: Date) -> Date;
}

/// Random choices made by the reference-data seeder.
pub trait ReferenceSampler: FakeData {
    /// Picks the region a store belongs to. `None` only when `regions` is empty.
    fn pick_region(&mut self, regions: &[RegionId]) -> Option<RegionId>;

    /// List price of a seeded product.
    fn product_price(&mut self) -> Money;
}

/// Random choices made by the transactional generator.
///
/// Identifier methods return raw values; the generator checks them against
/// the configured pools.
pub trait SalesSampler: FakeData {
    /// Number of sales for `store` on day offset `day`.
    fn sales_per_day(&mut self, store: StoreId, day: u32) -> u32;

    fn customer_id(&mut self) -> i64;

    fn salesperson_id(&mut self) -> i64;

    /// `count` distinct product identifiers.
    fn product_ids(&mut self, count: u32) -> Vec<i64>;

    fn quantity(&mut self) -> u32;

    fn unit_price(&mut self) -> Money;

    /// A payment for a sale made at `sold_at`.
    fn payment(&mut self, sold_at: PrimitiveDateTime) -> Payment;
}

/// Samples uniformly from configured ranges using any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomSampler<R> {
    rng: R,
    sales_per_day: SampleRange<u32>,
    customer_pool: IdentifierPool,
    salesperson_pool: IdentifierPool,
    product_pool: IdentifierPool,
    quantity: SampleRange<u32>,
    unit_price: SampleRange<Money>,
    product_price: SampleRange<Money>,
}

impl<R: Rng> RandomSampler<R> {
    /// Wraps `rng`, sampling within the ranges of both configurations.
    pub const fn new(rng: R, generator: &GeneratorConfig, reference: &SeedConfig) -> Self {
        Self {
            rng,
            sales_per_day: generator.sales_per_day,
            customer_pool: generator.customer_pool,
            salesperson_pool: generator.salesperson_pool,
            product_pool: generator.product_pool,
            quantity: generator.quantity,
            unit_price: generator.unit_price,
            product_price: reference.product_price,
        }
    }

    fn sample_pool(&mut self, pool: IdentifierPool) -> i64 {
        self.rng.random_range(pool.first()..=pool.last())
    }

    fn sample_money(&mut self, range: SampleRange<Money>) -> Money {
        Money::from_cents(
            self.rng
                .random_range(range.min.cents()..=range.max.cents()),
        )
    }
}

impl RandomSampler<StdRng> {
    /// A sampler over `StdRng`, seeded from `seed` when given and from the
    /// operating system otherwise. The same seed and configuration always
    /// produce the same data.
    #[must_use]
    pub fn from_seed(
        seed: Option<u64>,
        generator: &GeneratorConfig,
        reference: &SeedConfig,
    ) -> Self {
        let rng: StdRng = seed.map_or_else(rand::make_rng, StdRng::seed_from_u64);
        Self::new(rng, generator, reference)
    }
}

impl<R: Rng> FakeData for RandomSampler<R> {
    fn person_name(&mut self) -> String {
        faker::person_name(&mut self.rng)
    }

    fn email(&mut self, name: &str) -> String {
        faker::email(&mut self.rng, name)
    }

    fn phone(&mut self) -> Option<String> {
        Some(faker::phone(&mut self.rng))
    }

    fn company_name(&mut self) -> String {
        faker::company_name(&mut self.rng)
    }

    fn date_this_decade(&mut self, today: Date) -> Date {
        faker::date_this_decade(&mut self.rng, today)
    }
}

impl<R: Rng> ReferenceSampler for RandomSampler<R> {
    fn pick_region(&mut self, regions: &[RegionId]) -> Option<RegionId> {
        regions.choose(&mut self.rng).copied()
    }

    fn product_price(&mut self) -> Money {
        self.sample_money(self.product_price)
    }
}

impl<R: Rng> SalesSampler for RandomSampler<R> {
    fn sales_per_day(&mut self, _store: StoreId, _day: u32) -> u32 {
        self.rng
            .random_range(self.sales_per_day.min..=self.sales_per_day.max)
    }

    fn customer_id(&mut self) -> i64 {
        self.sample_pool(self.customer_pool)
    }

    fn salesperson_id(&mut self) -> i64 {
        self.sample_pool(self.salesperson_pool)
    }

    fn product_ids(&mut self, count: u32) -> Vec<i64> {
        let length: usize = usize::try_from(self.product_pool.len()).unwrap_or(usize::MAX);
        let amount: usize = usize::try_from(count).unwrap_or(usize::MAX).min(length);

        rand::seq::index::sample(&mut self.rng, length, amount)
            .iter()
            .filter_map(|index| u64::try_from(index).ok())
            .filter_map(|index| self.product_pool.nth(index))
            .collect()
    }

    fn quantity(&mut self) -> u32 {
        self.rng.random_range(self.quantity.min..=self.quantity.max)
    }

    fn unit_price(&mut self) -> Money {
        self.sample_money(self.unit_price)
    }

    fn payment(&mut self, sold_at: PrimitiveDateTime) -> Payment {
        let method: PaymentMethod = PaymentMethod::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PaymentMethod::Cash);

        // Roughly 85% approved, 10% pending, 5% declined
        let status: PaymentStatus = match self.rng.random_range(0..100_u32) {
            0..85 => PaymentStatus::Approved,
            85..95 => PaymentStatus::Pending,
            _ => PaymentStatus::Declined,
        };

        let delay: Duration = Duration::minutes(self.rng.random_range(0..=30));
        Payment {
            method,
            status,
            created_at: sold_at.checked_add(delay).unwrap_or(sold_at),
        }
    }
}
