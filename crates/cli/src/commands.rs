// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command implementations, generic over the storage session so the same
//! code path serves the `SQLite` database and `--dry-run`.

use std::path::Path;

use retail_analytics::{
    AppConfig, CatalogEntry, ConfigError, GeneratedSales, GeneratorError, PersistSummary,
    RandomSampler, ReferenceSampler, ReferenceSummary, SalesSampler, Session, generate_sales,
    read_catalog_file, run_generation, seed_reference_data,
};
use time::{OffsetDateTime, PrimitiveDateTime, Time};
use tracing::info;

/// Generation flags that override the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOverrides {
    pub stores: Option<u32>,
    pub days: Option<u32>,
    pub payments: bool,
    pub no_preflight: bool,
}

impl GenerateOverrides {
    /// Applies the flags that were given; absent flags keep the file's values.
    pub const fn apply(&self, config: &mut AppConfig) {
        if let Some(stores) = self.stores {
            config.generator.store_count = stores;
        }
        if let Some(days) = self.days {
            config.generator.days = days;
        }
        if self.payments {
            config.generator.payments = true;
        }
        if self.no_preflight {
            config.generator.verify_references = false;
        }
    }
}

/// Loads the configuration file, or the defaults when no file is given,
/// and applies the `--seed` override.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

/// The current UTC time, truncated to whole seconds.
///
/// # Errors
///
/// Returns an error if the clock reading is not a valid time of day.
pub fn current_time() -> Result<PrimitiveDateTime, time::error::ComponentRange> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let time: Time = Time::from_hms(now.hour(), now.minute(), now.second())?;
    Ok(PrimitiveDateTime::new(now.date(), time))
}

fn sampler_for(config: &AppConfig) -> impl ReferenceSampler + SalesSampler {
    RandomSampler::from_seed(config.seed, &config.generator, &config.reference)
}

/// Reads the catalog file, then seeds reference data.
///
/// The whole catalog is read and checked before anything is written.
///
/// # Errors
///
/// Returns an error if the configuration or catalog is invalid, or seeding
/// fails.
pub fn seed_reference<S: Session>(
    session: &mut S,
    config: &AppConfig,
    catalog: &Path,
    today: time::Date,
) -> Result<ReferenceSummary, GeneratorError> {
    let entries: Vec<CatalogEntry> = read_catalog_file(catalog)?;
    info!(path = %catalog.display(), rows = entries.len(), "Catalog loaded");
    seed_reference_data(session, &mut sampler_for(config), &config.reference, &entries, today)
}

/// Generates and persists sales.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the reference check
/// fails, or a commit fails.
pub fn generate<S: Session>(
    session: &mut S,
    config: &AppConfig,
    now: PrimitiveDateTime,
) -> Result<PersistSummary, GeneratorError> {
    run_generation(session, &config.generator, &mut sampler_for(config), now)
}

/// Generates sales without writing anything.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or generation fails.
pub fn preview(
    config: &AppConfig,
    now: PrimitiveDateTime,
) -> Result<GeneratedSales, GeneratorError> {
    generate_sales(&config.generator, &mut sampler_for(config), now)
}

/// Seeds reference data, then generates sales, with one random source.
///
/// # Errors
///
/// Returns the first error raised; a failed generation leaves the
/// reference data committed.
pub fn seed_and_generate<S: Session>(
    session: &mut S,
    config: &AppConfig,
    catalog: &Path,
    now: PrimitiveDateTime,
) -> Result<(ReferenceSummary, PersistSummary), GeneratorError> {
    let entries: Vec<CatalogEntry> = read_catalog_file(catalog)?;
    info!(path = %catalog.display(), rows = entries.len(), "Catalog loaded");

    let mut sampler = sampler_for(config);
    let reference: ReferenceSummary =
        seed_reference_data(session, &mut sampler, &config.reference, &entries, now.date())?;
    let generated: PersistSummary = run_generation(session, &config.generator, &mut sampler, now)?;
    Ok((reference, generated))
}
