// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Synthetic retail data generation.
//!
//! Two independently invocable steps populate a retail schema:
//!
//! - the **reference-data seeder** ([`seed_reference_data`]) creates regions,
//!   categories, stores and products;
//! - the **transactional generator** ([`run_generation`]) synthesizes a
//!   (store, day) grid of sales with their customers, salespeople, line items
//!   and optional payments, then persists them in two dependency-ordered
//!   batches.
//!
//! Storage is reached only through the [`Session`] trait. [`MemorySession`]
//! is the in-crate implementation; the persistence crate provides a
//! database-backed one.
//!
//! All randomness flows through the [`ReferenceSampler`] and [`SalesSampler`]
//! traits. [`RandomSampler`] implements both on top of any `rand` generator;
//! seeding it makes runs reproducible.

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
#![allow(clippy::multiple_crate_versions)]

mod arena;
mod batch;
mod catalog;
mod config;
mod error;
mod faker;
mod generator;
mod memory;
mod sampler;
mod seeder;
mod session;

#[cfg(test)]
mod tests;

pub use arena::WorkingSet;
pub use batch::{Batch, commit_in_order};
pub use catalog::{
    CATEGORY_COLUMN, CatalogEntry, CatalogError, NAME_COLUMN, read_catalog, read_catalog_file,
};
pub use config::{AppConfig, ConfigError, GeneratorConfig, SampleRange, SeedConfig};
pub use error::GeneratorError;
pub use generator::{
    GeneratedSale, GeneratedSales, PEOPLE_BATCH, PersistSummary, SALES_BATCH, check_reference_data,
    generate_sales, persist_sales, run_generation,
};
pub use memory::{MemoryError, MemorySession, Tables};
pub use sampler::{FakeData, RandomSampler, ReferenceSampler, SalesSampler};
pub use seeder::{
    ProductSeedSummary, ReferenceSummary, seed_categories, seed_products, seed_reference_data,
    seed_regions, seed_stores,
};
pub use session::{
    AssignedId, CategoryFilter, CategoryRecord, CommitReceipt, PendingRow, SaleKey, Session,
};
