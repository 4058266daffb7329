// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use retail_analytics_domain::{
    CustomerId, EntityKind, IdentifierPool, Money, ProductId, SalespersonId, StoreId,
};
use time::{Duration, PrimitiveDateTime};

use crate::tests::helpers::{ScriptedSampler, create_test_config, create_test_now};
use crate::{
    GeneratedSales, GeneratorConfig, GeneratorError, PEOPLE_BATCH, PendingRow, SALES_BATCH,
    SaleKey, generate_sales,
};

fn create_forced_sampler() -> ScriptedSampler {
    ScriptedSampler {
        sales_per_day: 2,
        product_sets: vec![vec![5, 12, 47]],
        quantities: vec![1, 2, 3],
        unit_prices: vec![
            Money::from_cents(1_000),
            Money::from_cents(2_050),
            Money::from_cents(525),
        ],
        ..ScriptedSampler::new()
    }
}

#[test]
fn test_forced_grid_produces_two_sales_with_three_items_each() {
    let config: GeneratorConfig = create_test_config();
    let mut sampler: ScriptedSampler = create_forced_sampler();

    let generated: GeneratedSales =
        generate_sales(&config, &mut sampler, create_test_now()).unwrap();

    assert_eq!(generated.sales.len(), 2);
    for sale in &generated.sales {
        let products: Vec<ProductId> = sale.items.iter().map(|item| item.product_id).collect();
        assert_eq!(
            products,
            vec![ProductId::new(5), ProductId::new(12), ProductId::new(47)]
        );
        // 1 x 10.00 + 2 x 20.50 + 3 x 5.25
        assert_eq!(sale.sale.total, Money::from_cents(6_675));
        assert_eq!(sale.sale.store_id, StoreId::new(1));
        assert_eq!(sale.sale.sold_at, create_test_now());
    }
    assert_eq!(generated.line_item_count(), 6);
}

#[test]
fn test_repeated_identifiers_produce_one_record_each() {
    let config: GeneratorConfig = GeneratorConfig {
        days: 3,
        ..create_test_config()
    };
    let mut sampler: ScriptedSampler = ScriptedSampler {
        sales_per_day: 4,
        customer_ids: vec![7, 9, 7],
        salesperson_ids: vec![3],
        ..ScriptedSampler::new()
    };

    let generated: GeneratedSales =
        generate_sales(&config, &mut sampler, create_test_now()).unwrap();

    assert_eq!(generated.sales.len(), 12);
    let customers: Vec<CustomerId> = generated.customers.iter().map(|c| c.id).collect();
    assert_eq!(customers, vec![CustomerId::new(7), CustomerId::new(9)]);
    assert_eq!(generated.salespeople.len(), 1);
    assert_eq!(generated.salespeople[0].id, SalespersonId::new(3));
}

#[test]
fn test_salesperson_keeps_store_where_first_drawn() {
    let config: GeneratorConfig = GeneratorConfig {
        store_count: 3,
        ..create_test_config()
    };
    let mut sampler: ScriptedSampler = ScriptedSampler {
        salesperson_ids: vec![42],
        ..ScriptedSampler::new()
    };

    let generated: GeneratedSales =
        generate_sales(&config, &mut sampler, create_test_now()).unwrap();

    assert_eq!(generated.sales.len(), 3);
    assert_eq!(generated.salespeople.len(), 1);
    assert_eq!(generated.salespeople[0].store_id, StoreId::new(1));
    let stores: Vec<StoreId> = generated.sales.iter().map(|s| s.sale.store_id).collect();
    assert_eq!(stores, vec![StoreId::new(1), StoreId::new(2), StoreId::new(3)]);
}

#[test]
fn test_day_offsets_count_back_from_now() {
    let config: GeneratorConfig = GeneratorConfig {
        days: 3,
        ..create_test_config()
    };
    let mut sampler: ScriptedSampler = ScriptedSampler::new();
    let now: PrimitiveDateTime = create_test_now();

    let generated: GeneratedSales = generate_sales(&config, &mut sampler, now).unwrap();

    let dates: Vec<PrimitiveDateTime> = generated.sales.iter().map(|s| s.sale.sold_at).collect();
    assert_eq!(
        dates,
        vec![now, now - Duration::days(1), now - Duration::days(2)]
    );
}

#[test]
fn test_zero_sales_per_day_yields_empty_run() {
    let config: GeneratorConfig = create_test_config();
    let mut sampler: ScriptedSampler = ScriptedSampler {
        sales_per_day: 0,
        ..ScriptedSampler::new()
    };

    let generated: GeneratedSales =
        generate_sales(&config, &mut sampler, create_test_now()).unwrap();

    assert!(generated.sales.is_empty());
    assert!(generated.customers.is_empty());
    assert!(generated.salespeople.is_empty());
}

#[test]
fn test_out_of_pool_customer_aborts() {
    let config: GeneratorConfig = create_test_config();
    let mut sampler: ScriptedSampler = ScriptedSampler {
        customer_ids: vec![1_001],
        ..ScriptedSampler::new()
    };

    let result: Result<GeneratedSales, GeneratorError> =
        generate_sales(&config, &mut sampler, create_test_now());

    assert!(matches!(
        result,
        Err(GeneratorError::IdentifierOutOfPool {
            kind: EntityKind::Customer,
            ..
        })
    ));
}

#[test]
fn test_out_of_pool_product_aborts() {
    let config: GeneratorConfig = GeneratorConfig {
        product_pool: IdentifierPool::new(1, 20).unwrap(),
        ..create_test_config()
    };
    let mut sampler: ScriptedSampler = ScriptedSampler::new();

    let result: Result<GeneratedSales, GeneratorError> =
        generate_sales(&config, &mut sampler, create_test_now());

    assert!(matches!(
        result,
        Err(GeneratorError::IdentifierOutOfPool {
            kind: EntityKind::Product,
            ..
        })
    ));
}

#[test]
fn test_duplicate_product_in_sale_aborts() {
    let config: GeneratorConfig = create_test_config();
    let mut sampler: ScriptedSampler = ScriptedSampler {
        product_sets: vec![vec![5, 5, 47]],
        ..ScriptedSampler::new()
    };

    let result: Result<GeneratedSales, GeneratorError> =
        generate_sales(&config, &mut sampler, create_test_now());

    assert!(matches!(
        result,
        Err(GeneratorError::DuplicateProductInSale { product }) if product == ProductId::new(5)
    ));
}

#[test]
fn test_wrong_product_count_aborts() {
    let config: GeneratorConfig = create_test_config();
    let mut sampler: ScriptedSampler = ScriptedSampler {
        product_sets: vec![vec![5, 12]],
        ..ScriptedSampler::new()
    };

    let result: Result<GeneratedSales, GeneratorError> =
        generate_sales(&config, &mut sampler, create_test_now());

    assert!(matches!(
        result,
        Err(GeneratorError::ProductSampleSize {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn test_zero_quantity_aborts() {
    let config: GeneratorConfig = create_test_config();
    let mut sampler: ScriptedSampler = ScriptedSampler {
        quantities: vec![0],
        ..ScriptedSampler::new()
    };

    let result: Result<GeneratedSales, GeneratorError> =
        generate_sales(&config, &mut sampler, create_test_now());

    assert!(matches!(result, Err(GeneratorError::Domain(_))));
}

#[test]
fn test_invalid_config_is_rejected_before_sampling() {
    let config: GeneratorConfig = GeneratorConfig {
        items_per_sale: 30,
        product_pool: IdentifierPool::new(1, 10).unwrap(),
        ..create_test_config()
    };
    let mut sampler: ScriptedSampler = ScriptedSampler::new();

    let result: Result<GeneratedSales, GeneratorError> =
        generate_sales(&config, &mut sampler, create_test_now());

    assert!(matches!(result, Err(GeneratorError::Config(_))));
}

#[test]
fn test_payments_generated_only_when_enabled() {
    let mut sampler: ScriptedSampler = ScriptedSampler {
        sales_per_day: 3,
        ..ScriptedSampler::new()
    };

    let without: GeneratedSales =
        generate_sales(&create_test_config(), &mut sampler, create_test_now()).unwrap();
    assert_eq!(without.payment_count(), 0);

    let config: GeneratorConfig = GeneratorConfig {
        payments: true,
        ..create_test_config()
    };
    let with: GeneratedSales = generate_sales(&config, &mut sampler, create_test_now()).unwrap();
    assert_eq!(with.payment_count(), 3);
}

#[test]
fn test_batches_follow_dependency_order() {
    let config: GeneratorConfig = GeneratorConfig {
        payments: true,
        ..create_test_config()
    };
    let mut sampler: ScriptedSampler = ScriptedSampler {
        sales_per_day: 2,
        customer_ids: vec![1, 2],
        ..ScriptedSampler::new()
    };
    let generated: GeneratedSales =
        generate_sales(&config, &mut sampler, create_test_now()).unwrap();

    let batches = generated.into_batches();

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].label, PEOPLE_BATCH);
    assert_eq!(batches[1].label, SALES_BATCH);

    let people: Vec<EntityKind> = batches[0].rows.iter().map(PendingRow::kind).collect();
    assert_eq!(
        people,
        vec![
            EntityKind::Customer,
            EntityKind::Customer,
            EntityKind::Salesperson
        ]
    );

    let sales: Vec<EntityKind> = batches[1].rows.iter().map(PendingRow::kind).collect();
    let mut expected: Vec<EntityKind> = vec![EntityKind::Sale; 2];
    expected.extend(vec![EntityKind::SaleLineItem; 6]);
    expected.extend(vec![EntityKind::Payment; 2]);
    assert_eq!(sales, expected);

    let item_keys: BTreeSet<SaleKey> = batches[1]
        .rows
        .iter()
        .filter_map(|row| match row {
            PendingRow::LineItem { sale, .. } => Some(*sale),
            _ => None,
        })
        .collect();
    assert_eq!(
        item_keys,
        BTreeSet::from([SaleKey::new(0), SaleKey::new(1)])
    );
}
