// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Run configuration.
//!
//! Every field has a default matching the reference run (10 stores, 365
//! days, 50-100 sales a day, 3 products per sale). A JSON file may override
//! any subset of fields; the CLI applies its own flags on top.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use retail_analytics_domain::{IdentifierPool, Money};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A sampling range has `min > max`.
    #[error("Invalid range for {field}: min {min} is greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: String,
        max: String,
    },

    /// A range or count that must be positive is not.
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    /// The product pool cannot supply enough distinct products for a sale.
    #[error(
        "Product pool {pool} holds {available} identifiers but each sale needs {items_per_sale} distinct products"
    )]
    ProductPoolTooSmall {
        pool: IdentifierPool,
        available: u64,
        items_per_sale: u32,
    },

    /// A list that must contain at least one entry is empty.
    #[error("{field} must not be empty")]
    EmptyList { field: &'static str },

    /// The configuration file could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this schema.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// An inclusive sampling range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Display + Copy> SampleRange<T> {
    /// Creates a range. Validation happens in [`SampleRange::validate`].
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Returns whether `value` lies within the range.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        Ok(())
    }
}

const fn pool(first: i64, last: i64) -> IdentifierPool {
    match IdentifierPool::bounded(first, last) {
        Some(pool) => pool,
        None => panic!("default identifier pool bounds are invalid"),
    }
}

const DEFAULT_CUSTOMER_POOL: IdentifierPool = pool(1, 1000);
const DEFAULT_SALESPERSON_POOL: IdentifierPool = pool(1, 100);
const DEFAULT_PRODUCT_POOL: IdentifierPool = pool(1, 1000);

const DEFAULT_PRICE_RANGE: SampleRange<Money> =
    SampleRange::new(Money::from_cents(1_000), Money::from_cents(50_000));

/// Settings for the transactional-data generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Stores `1..=store_count` receive sales.
    pub store_count: u32,
    /// Day offsets `0..days` are generated; offset 0 is "now".
    pub days: u32,
    /// Sales per (store, day).
    pub sales_per_day: SampleRange<u32>,
    pub customer_pool: IdentifierPool,
    pub salesperson_pool: IdentifierPool,
    pub product_pool: IdentifierPool,
    /// Distinct products per sale.
    pub items_per_sale: u32,
    pub quantity: SampleRange<u32>,
    /// Unit price per line item, in cents.
    pub unit_price: SampleRange<Money>,
    /// Generate one payment per sale.
    pub payments: bool,
    /// Check that stores and products cover the configured pools before generating.
    pub verify_references: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            store_count: 10,
            days: 365,
            sales_per_day: SampleRange::new(50, 100),
            customer_pool: DEFAULT_CUSTOMER_POOL,
            salesperson_pool: DEFAULT_SALESPERSON_POOL,
            product_pool: DEFAULT_PRODUCT_POOL,
            items_per_sale: 3,
            quantity: SampleRange::new(1, 5),
            unit_price: DEFAULT_PRICE_RANGE,
            payments: false,
            verify_references: true,
        }
    }
}

impl GeneratorConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a range is inverted, a count is zero, the product
    /// pool is smaller than `items_per_sale`, or prices/quantities could be
    /// non-positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_count == 0 {
            return Err(ConfigError::NotPositive {
                field: "store_count",
            });
        }
        if self.days == 0 {
            return Err(ConfigError::NotPositive { field: "days" });
        }
        if self.items_per_sale == 0 {
            return Err(ConfigError::NotPositive {
                field: "items_per_sale",
            });
        }

        self.sales_per_day.validate("sales_per_day")?;
        self.quantity.validate("quantity")?;
        self.unit_price.validate("unit_price")?;

        if self.quantity.min == 0 {
            return Err(ConfigError::NotPositive {
                field: "quantity.min",
            });
        }
        if !self.unit_price.min.is_positive() {
            return Err(ConfigError::NotPositive {
                field: "unit_price.min",
            });
        }

        let available: u64 = self.product_pool.len();
        if available < u64::from(self.items_per_sale) {
            return Err(ConfigError::ProductPoolTooSmall {
                pool: self.product_pool,
                available,
                items_per_sale: self.items_per_sale,
            });
        }

        Ok(())
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// Settings for the reference-data seeder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub categories: Vec<String>,
    pub regions: Vec<String>,
    pub store_count: u32,
    /// List price of seeded products, in cents.
    pub product_price: SampleRange<Money>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            categories: owned(&[
                "Eletrônicos",
                "Roupas",
                "Alimentos",
                "Móveis",
                "Brinquedos",
                "Ferramentas",
                "Livros",
                "Jogos",
                "Esportes",
                "Beleza",
            ]),
            regions: owned(&["Norte", "Sul", "Leste", "Oeste", "Centro-Oeste"]),
            store_count: 10,
            product_price: DEFAULT_PRICE_RANGE,
        }
    }
}

impl SeedConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no regions, no stores, or the price
    /// range is inverted or non-positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regions.is_empty() {
            return Err(ConfigError::EmptyList { field: "regions" });
        }
        if self.store_count == 0 {
            return Err(ConfigError::NotPositive {
                field: "store_count",
            });
        }
        self.product_price.validate("product_price")?;
        if !self.product_price.min.is_positive() {
            return Err(ConfigError::NotPositive {
                field: "product_price.min",
            });
        }
        Ok(())
    }
}

/// Whole-application configuration as stored in a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for the random source. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    pub reference: SeedConfig,
    pub generator: GeneratorConfig,
}

impl AppConfig {
    /// Loads a configuration file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw: String = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reference.validate()?;
        self.generator.validate()
    }
}
