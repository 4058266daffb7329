// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference-data seeding: regions, categories, stores and products.

use std::collections::HashMap;

use retail_analytics_domain::{
    Category, CategoryId, EntityKind, Product, ProductId, Region, RegionId, Store, StoreId,
    validate_name, validate_product, validate_store,
};
use time::Date;
use tracing::{debug, info};

use crate::batch::{Batch, commit_in_order};
use crate::catalog::CatalogEntry;
use crate::config::SeedConfig;
use crate::error::GeneratorError;
use crate::sampler::ReferenceSampler;
use crate::session::{CategoryFilter, CommitReceipt, PendingRow, Session};

/// Result of [`seed_products`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSeedSummary {
    pub products: Vec<ProductId>,
    /// Category labels that did not exist and were created on the fly.
    pub categories_created: Vec<String>,
}

/// Row counts written by [`seed_reference_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceSummary {
    pub regions: usize,
    pub categories: usize,
    pub stores: usize,
    pub products: usize,
    pub categories_created: usize,
}

fn commit_one_batch<S: Session>(
    session: &mut S,
    label: &'static str,
    rows: Vec<PendingRow>,
) -> Result<CommitReceipt, GeneratorError> {
    let mut receipts: Vec<CommitReceipt> = commit_in_order(session, vec![Batch::new(label, rows)])?;
    receipts
        .pop()
        .ok_or_else(|| GeneratorError::MissingAssignedId(String::from(label)))
}

/// Creates one category per name in a single commit.
///
/// # Errors
///
/// Returns an error if a name is blank or the commit fails.
pub fn seed_categories<S: Session>(
    session: &mut S,
    names: &[String],
) -> Result<Vec<CategoryId>, GeneratorError> {
    let mut rows: Vec<PendingRow> = Vec::with_capacity(names.len());
    for name in names {
        validate_name(EntityKind::Category, name)?;
        rows.push(PendingRow::Category(Category { name: name.clone() }));
    }

    let ids: Vec<CategoryId> = commit_one_batch(session, "categories", rows)?.category_ids();
    info!(count = ids.len(), "Seeded categories");
    Ok(ids)
}

/// Creates one region per name in a single commit.
///
/// # Errors
///
/// Returns an error if a name is blank or the commit fails.
pub fn seed_regions<S: Session>(
    session: &mut S,
    names: &[String],
) -> Result<Vec<RegionId>, GeneratorError> {
    let mut rows: Vec<PendingRow> = Vec::with_capacity(names.len());
    for name in names {
        validate_name(EntityKind::Region, name)?;
        rows.push(PendingRow::Region(Region { name: name.clone() }));
    }

    let ids: Vec<RegionId> = commit_one_batch(session, "regions", rows)?.region_ids();
    info!(count = ids.len(), "Seeded regions");
    Ok(ids)
}

/// Creates `count` stores, each in a randomly picked region.
///
/// # Errors
///
/// Returns `GeneratorError::NoRegions` if `regions` is empty, or an error
/// if a store fails validation or the commit fails.
pub fn seed_stores<S, P>(
    session: &mut S,
    sampler: &mut P,
    count: u32,
    regions: &[RegionId],
    today: Date,
) -> Result<Vec<StoreId>, GeneratorError>
where
    S: Session,
    P: ReferenceSampler,
{
    if regions.is_empty() {
        return Err(GeneratorError::NoRegions);
    }

    let mut rows: Vec<PendingRow> = Vec::new();
    for _ in 0..count {
        let region_id: RegionId = sampler
            .pick_region(regions)
            .ok_or(GeneratorError::NoRegions)?;
        let store = Store {
            name: sampler.company_name(),
            region_id,
            created_on: sampler.date_this_decade(today),
        };
        validate_store(&store)?;
        rows.push(PendingRow::Store(store));
    }

    let ids: Vec<StoreId> = commit_one_batch(session, "stores", rows)?.store_ids();
    info!(count = ids.len(), "Seeded stores");
    Ok(ids)
}

/// Resolves category labels to identifiers, creating missing categories.
struct CategoryResolver {
    cache: HashMap<String, CategoryId>,
    created: Vec<String>,
}

impl CategoryResolver {
    fn primed<S: Session>(session: &mut S) -> Result<Self, GeneratorError> {
        let cache: HashMap<String, CategoryId> = session
            .categories(&CategoryFilter::all())
            .map_err(GeneratorError::storage)?
            .into_iter()
            .map(|record| (record.name, record.id))
            .collect();
        debug!(cached = cache.len(), "Primed category cache");
        Ok(Self {
            cache,
            created: Vec::new(),
        })
    }

    fn create<S: Session>(
        &mut self,
        session: &mut S,
        label: &str,
    ) -> Result<CategoryId, GeneratorError> {
        validate_name(EntityKind::Category, label)?;
        let row = PendingRow::Category(Category {
            name: label.to_string(),
        });
        let id: CategoryId = commit_one_batch(session, "category", vec![row])?
            .category_ids()
            .first()
            .copied()
            .ok_or_else(|| GeneratorError::MissingAssignedId(format!("category '{label}'")))?;
        info!(category = label, id = %id, "Created category from catalog");
        self.created.push(label.to_string());
        Ok(id)
    }

    /// Cache first, then a lookup by name, then a committed insert.
    fn resolve<S: Session>(
        &mut self,
        session: &mut S,
        label: &str,
    ) -> Result<CategoryId, GeneratorError> {
        if let Some(id) = self.cache.get(label) {
            return Ok(*id);
        }

        let existing: Option<CategoryId> = session
            .categories(&CategoryFilter::by_name(label))
            .map_err(GeneratorError::storage)?
            .first()
            .map(|record| record.id);

        let id: CategoryId = match existing {
            Some(id) => id,
            None => self.create(session, label)?,
        };

        self.cache.insert(label.to_string(), id);
        Ok(id)
    }
}

/// Creates one product per catalog entry.
///
/// Each entry's category label is resolved before any product is written;
/// categories missing from storage are created and committed one at a
/// time. All products are then committed together.
///
/// # Errors
///
/// Returns an error if a query or commit fails or a product fails
/// validation. Categories created before the failure stay committed.
pub fn seed_products<S, P>(
    session: &mut S,
    sampler: &mut P,
    catalog: &[CatalogEntry],
    today: Date,
) -> Result<ProductSeedSummary, GeneratorError>
where
    S: Session,
    P: ReferenceSampler,
{
    let mut resolver: CategoryResolver = CategoryResolver::primed(session)?;

    let mut rows: Vec<PendingRow> = Vec::with_capacity(catalog.len());
    for entry in catalog {
        let category_id: CategoryId = resolver.resolve(session, &entry.category)?;
        let product = Product {
            name: entry.name.clone(),
            category_id,
            price: sampler.product_price(),
            created_on: sampler.date_this_decade(today),
        };
        validate_product(&product)?;
        rows.push(PendingRow::Product(product));
    }

    let products: Vec<ProductId> = commit_one_batch(session, "products", rows)?.product_ids();
    info!(
        count = products.len(),
        categories_created = resolver.created.len(),
        "Seeded products"
    );
    Ok(ProductSeedSummary {
        products,
        categories_created: resolver.created,
    })
}

/// Seeds categories, regions, stores and products, in that order.
///
/// # Errors
///
/// Returns the first error raised; steps already committed stay durable.
pub fn seed_reference_data<S, P>(
    session: &mut S,
    sampler: &mut P,
    config: &SeedConfig,
    catalog: &[CatalogEntry],
    today: Date,
) -> Result<ReferenceSummary, GeneratorError>
where
    S: Session,
    P: ReferenceSampler,
{
    config.validate()?;
    info!(
        categories = config.categories.len(),
        regions = config.regions.len(),
        stores = config.store_count,
        catalog = catalog.len(),
        "Seeding reference data"
    );

    let categories: Vec<CategoryId> = seed_categories(session, &config.categories)?;
    let regions: Vec<RegionId> = seed_regions(session, &config.regions)?;
    let stores: Vec<StoreId> = seed_stores(session, sampler, config.store_count, &regions, today)?;
    let products: ProductSeedSummary = seed_products(session, sampler, catalog, today)?;

    Ok(ReferenceSummary {
        regions: regions.len(),
        categories: categories.len(),
        stores: stores.len(),
        products: products.products.len(),
        categories_created: products.categories_created.len(),
    })
}
