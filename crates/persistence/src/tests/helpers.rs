// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use retail_analytics::{
    CatalogEntry, GeneratorConfig, PersistSummary, RandomSampler, ReferenceSummary, SampleRange,
    SeedConfig, run_generation, seed_reference_data,
};
use retail_analytics_domain::IdentifierPool;
use time::macros::datetime;
use time::{Date, PrimitiveDateTime};

use crate::SqlitePersistence;

pub const fn create_test_now() -> PrimitiveDateTime {
    datetime!(2026-03-15 10:30:00)
}

pub const fn create_test_today() -> Date {
    create_test_now().date()
}

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create test persistence")
}

/// A catalog of `count` products alternating between two seeded categories.
pub fn create_test_catalog(count: usize) -> Vec<CatalogEntry> {
    (1..=count)
        .map(|n| CatalogEntry {
            name: format!("Produto {n}"),
            category: String::from(if n % 2 == 0 { "Jogos" } else { "Livros" }),
        })
        .collect()
}

pub fn create_test_seed_config(stores: u32) -> SeedConfig {
    SeedConfig {
        categories: vec![String::from("Livros"), String::from("Jogos")],
        regions: vec![String::from("Norte"), String::from("Sul")],
        store_count: stores,
        ..SeedConfig::default()
    }
}

/// A small grid: `stores` × 2 days × 3 sales, three products per sale drawn
/// from `1..=product_pool`.
pub fn create_test_generator_config(stores: u32, product_pool: i64) -> GeneratorConfig {
    GeneratorConfig {
        store_count: stores,
        days: 2,
        sales_per_day: SampleRange::new(3, 3),
        customer_pool: IdentifierPool::new(1, 10).unwrap(),
        salesperson_pool: IdentifierPool::new(1, 5).unwrap(),
        product_pool: IdentifierPool::new(1, product_pool).unwrap(),
        payments: true,
        ..GeneratorConfig::default()
    }
}

pub fn seed_test_reference(
    persistence: &mut SqlitePersistence,
    stores: u32,
    products: usize,
) -> ReferenceSummary {
    let config: SeedConfig = create_test_seed_config(stores);
    let mut sampler = RandomSampler::from_seed(Some(1), &GeneratorConfig::default(), &config);
    seed_reference_data(
        persistence,
        &mut sampler,
        &config,
        &create_test_catalog(products),
        create_test_today(),
    )
    .unwrap()
}

/// Seeds 2 stores and 30 products, then generates 12 sales with payments.
pub fn create_populated_persistence(seed: u64) -> (SqlitePersistence, PersistSummary) {
    let mut persistence: SqlitePersistence = create_test_persistence();
    seed_test_reference(&mut persistence, 2, 30);

    let config: GeneratorConfig = create_test_generator_config(2, 30);
    let mut sampler = RandomSampler::from_seed(Some(seed), &config, &SeedConfig::default());
    let summary: PersistSummary =
        run_generation(&mut persistence, &config, &mut sampler, create_test_now()).unwrap();
    (persistence, summary)
}
