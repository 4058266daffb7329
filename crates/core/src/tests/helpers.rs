// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use retail_analytics_domain::{Money, Payment, PaymentMethod, PaymentStatus, RegionId, StoreId};
use time::macros::datetime;
use time::{Date, PrimitiveDateTime};

use crate::{
    CatalogEntry, FakeData, GeneratorConfig, MemorySession, ReferenceSampler, SalesSampler,
    seed_categories, seed_products, seed_regions, seed_stores,
};

/// Fixed reference instant for generation tests.
pub const fn create_test_now() -> PrimitiveDateTime {
    datetime!(2026-03-15 10:30:00)
}

pub const fn create_test_today() -> Date {
    create_test_now().date()
}

/// A sampler that replays scripted values, cycling through each list.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    pub sales_per_day: u32,
    pub customer_ids: Vec<i64>,
    pub salesperson_ids: Vec<i64>,
    pub product_sets: Vec<Vec<i64>>,
    pub quantities: Vec<u32>,
    pub unit_prices: Vec<Money>,
    pub product_price: Money,
    pub(crate) cursors: [usize; 5],
    pub(crate) people: usize,
    pub(crate) companies: usize,
}

impl ScriptedSampler {
    pub fn new() -> Self {
        Self {
            sales_per_day: 1,
            customer_ids: vec![1],
            salesperson_ids: vec![1],
            product_sets: vec![vec![5, 12, 47]],
            quantities: vec![1],
            unit_prices: vec![Money::from_cents(1_000)],
            product_price: Money::from_cents(2_500),
            cursors: [0; 5],
            people: 0,
            companies: 0,
        }
    }

    fn next<T: Clone>(values: &[T], cursor: &mut usize) -> T {
        let value: T = values[*cursor % values.len()].clone();
        *cursor += 1;
        value
    }
}

impl Default for ScriptedSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeData for ScriptedSampler {
    fn person_name(&mut self) -> String {
        self.people += 1;
        format!("Pessoa {}", self.people)
    }

    fn email(&mut self, name: &str) -> String {
        format!("{}@example.com", name.to_lowercase().replace(' ', "."))
    }

    fn phone(&mut self) -> Option<String> {
        Some(String::from("+55 (11) 91234-5678"))
    }

    fn company_name(&mut self) -> String {
        self.companies += 1;
        format!("Loja {} Ltda.", self.companies)
    }

    fn date_this_decade(&mut self, today: Date) -> Date {
        today
    }
}

impl ReferenceSampler for ScriptedSampler {
    fn pick_region(&mut self, regions: &[RegionId]) -> Option<RegionId> {
        regions.first().copied()
    }

    fn product_price(&mut self) -> Money {
        self.product_price
    }
}

impl SalesSampler for ScriptedSampler {
    fn sales_per_day(&mut self, _store: StoreId, _day: u32) -> u32 {
        self.sales_per_day
    }

    fn customer_id(&mut self) -> i64 {
        Self::next(&self.customer_ids, &mut self.cursors[0])
    }

    fn salesperson_id(&mut self) -> i64 {
        Self::next(&self.salesperson_ids, &mut self.cursors[1])
    }

    fn product_ids(&mut self, _count: u32) -> Vec<i64> {
        Self::next(&self.product_sets, &mut self.cursors[2])
    }

    fn quantity(&mut self) -> u32 {
        Self::next(&self.quantities, &mut self.cursors[3])
    }

    fn unit_price(&mut self) -> Money {
        Self::next(&self.unit_prices, &mut self.cursors[4])
    }

    fn payment(&mut self, sold_at: PrimitiveDateTime) -> Payment {
        Payment {
            method: PaymentMethod::Pix,
            status: PaymentStatus::Approved,
            created_at: sold_at,
        }
    }
}

/// A single store, single day configuration.
pub fn create_test_config() -> GeneratorConfig {
    GeneratorConfig {
        store_count: 1,
        days: 1,
        ..GeneratorConfig::default()
    }
}

pub fn create_test_catalog(products: usize) -> Vec<CatalogEntry> {
    (1..=products)
        .map(|n| CatalogEntry {
            name: format!("Produto {n}"),
            category: String::from(if n % 2 == 0 { "Livros" } else { "Jogos" }),
        })
        .collect()
}

/// Seeds `stores` stores and `products` products so generated sales resolve.
pub fn seed_test_reference(session: &mut MemorySession, stores: u32, products: usize) {
    let mut sampler: ScriptedSampler = ScriptedSampler::new();
    let today: Date = create_test_today();

    seed_categories(session, &[String::from("Livros"), String::from("Jogos")]).unwrap();
    let regions: Vec<RegionId> =
        seed_regions(session, &[String::from("Norte"), String::from("Sul")]).unwrap();
    seed_stores(session, &mut sampler, stores, &regions, today).unwrap();
    seed_products(session, &mut sampler, &create_test_catalog(products), today).unwrap();
}
