// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use retail_analytics::{
    CategoryFilter, CategoryRecord, CommitReceipt, PendingRow, SaleKey, Session,
};
use retail_analytics_domain::{
    Category, CategoryId, Customer, CustomerId, EntityKind, Money, ProductId, Quantity, RegionId,
    Sale, SaleId, SaleLineItem, Salesperson, SalespersonId, Store, StoreId,
};

use crate::{SaleDetail, SqlitePersistence};
use crate::error::PersistenceError;
use crate::tests::helpers::{
    create_test_now, create_test_persistence, create_test_today, seed_test_reference,
};

fn create_category_row(name: &str) -> PendingRow {
    PendingRow::Category(Category {
        name: String::from(name),
    })
}

fn create_test_line_item(product: i64) -> SaleLineItem {
    SaleLineItem {
        product_id: ProductId::new(product),
        quantity: Quantity::new(2).unwrap(),
        unit_price: Money::from_cents(1_250),
    }
}

/// Seeds one store and four products, then commits one customer and one
/// salesperson.
fn create_people_persistence() -> SqlitePersistence {
    let mut persistence: SqlitePersistence = create_test_persistence();
    seed_test_reference(&mut persistence, 1, 4);

    persistence.add(PendingRow::Customer(Customer {
        id: CustomerId::new(7),
        name: String::from("Ana Souza"),
        email: String::from("ana.souza@example.com"),
        phone: None,
        created_on: create_test_today(),
    }));
    persistence.add(PendingRow::Salesperson(Salesperson {
        id: SalespersonId::new(3),
        name: String::from("Bruno Lima"),
        store_id: StoreId::new(1),
        created_on: create_test_today(),
    }));
    persistence.commit().unwrap();
    persistence
}

fn create_test_sale() -> Sale {
    Sale {
        customer_id: CustomerId::new(7),
        salesperson_id: SalespersonId::new(3),
        store_id: StoreId::new(1),
        sold_at: create_test_now(),
        total: Money::from_cents(2_500),
    }
}

#[test]
fn test_commit_assigns_sequential_ids() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence.add_all(["Livros", "Jogos", "Beleza"].map(create_category_row));

    let receipt: CommitReceipt = persistence.commit().unwrap();

    assert_eq!(
        receipt.category_ids(),
        vec![CategoryId::new(1), CategoryId::new(2), CategoryId::new(3)]
    );
    assert_eq!(receipt.count(EntityKind::Category), 3);
    assert_eq!(persistence.commits(), 1);
}

#[test]
fn test_pending_rows_are_invisible_until_commit() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence.add(create_category_row("Livros"));

    assert_eq!(persistence.pending(), 1);
    assert_eq!(persistence.count(EntityKind::Category).unwrap(), 0);

    persistence.commit().unwrap();

    assert_eq!(persistence.pending(), 0);
    assert_eq!(persistence.count(EntityKind::Category).unwrap(), 1);
}

#[test]
fn test_rollback_discards_pending_rows() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence.add(create_category_row("Livros"));

    persistence.rollback();
    let receipt: CommitReceipt = persistence.commit().unwrap();

    assert_eq!(receipt.rows(), 0);
    assert_eq!(persistence.count(EntityKind::Category).unwrap(), 0);
}

#[test]
fn test_failed_commit_rolls_back_every_row() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence.add_all(["Livros", "Jogos", "Livros"].map(create_category_row));

    let result: Result<CommitReceipt, PersistenceError> = persistence.commit();

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
    assert_eq!(persistence.count(EntityKind::Category).unwrap(), 0);
    assert_eq!(persistence.pending(), 0);
    assert_eq!(persistence.commits(), 0);

    // The session stays usable after a failed commit
    persistence.add(create_category_row("Livros"));
    assert!(persistence.commit().is_ok());
    assert_eq!(persistence.count(EntityKind::Category).unwrap(), 1);
}

#[test]
fn test_store_with_missing_region_is_rejected() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence.add(PendingRow::Store(Store {
        name: String::from("Loja Centro"),
        region_id: RegionId::new(9),
        created_on: create_test_today(),
    }));

    let result: Result<CommitReceipt, PersistenceError> = persistence.commit();

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
    assert_eq!(persistence.count(EntityKind::Store).unwrap(), 0);
}

#[test]
fn test_duplicate_customer_is_rejected() {
    let mut persistence: SqlitePersistence = create_people_persistence();
    persistence.add(PendingRow::Customer(Customer {
        id: CustomerId::new(7),
        name: String::from("Outra Pessoa"),
        email: String::from("outra@example.com"),
        phone: Some(String::from("+55 (11) 91234-5678")),
        created_on: create_test_today(),
    }));

    assert!(persistence.commit().is_err());
    assert_eq!(persistence.count(EntityKind::Customer).unwrap(), 1);
}

#[test]
fn test_category_filter_by_name() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence.add_all(["Livros", "Jogos"].map(create_category_row));
    persistence.commit().unwrap();

    let all: Vec<CategoryRecord> = persistence.categories(&CategoryFilter::all()).unwrap();
    let found: Vec<CategoryRecord> = persistence
        .categories(&CategoryFilter::by_name("Jogos"))
        .unwrap();
    let missing: Vec<CategoryRecord> = persistence
        .categories(&CategoryFilter::by_name("Móveis"))
        .unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(
        found,
        vec![CategoryRecord {
            id: CategoryId::new(2),
            name: String::from("Jogos"),
        }]
    );
    assert!(missing.is_empty());
}

#[test]
fn test_line_items_resolve_sale_keys_within_commit() {
    let mut persistence: SqlitePersistence = create_people_persistence();
    persistence.add(PendingRow::Sale {
        key: SaleKey::new(0),
        sale: create_test_sale(),
    });
    persistence.add(PendingRow::Sale {
        key: SaleKey::new(1),
        sale: create_test_sale(),
    });
    persistence.add(PendingRow::LineItem {
        sale: SaleKey::new(1),
        item: create_test_line_item(2),
    });

    let receipt: CommitReceipt = persistence.commit().unwrap();

    assert_eq!(
        receipt.sale_ids(),
        vec![
            (SaleKey::new(0), SaleId::new(1)),
            (SaleKey::new(1), SaleId::new(2))
        ]
    );
    let detail: SaleDetail = persistence.get_sale_detail(SaleId::new(2)).unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].product_id, ProductId::new(2));
    assert!(
        persistence
            .get_sale_detail(SaleId::new(1))
            .unwrap()
            .items
            .is_empty()
    );
}

#[test]
fn test_line_items_resolve_sale_keys_from_earlier_commit() {
    let mut persistence: SqlitePersistence = create_people_persistence();
    persistence.add(PendingRow::Sale {
        key: SaleKey::new(0),
        sale: create_test_sale(),
    });
    persistence.commit().unwrap();

    persistence.add(PendingRow::LineItem {
        sale: SaleKey::new(0),
        item: create_test_line_item(4),
    });
    let receipt: CommitReceipt = persistence.commit().unwrap();

    assert_eq!(receipt.count(EntityKind::SaleLineItem), 1);
    assert_eq!(persistence.count(EntityKind::SaleLineItem).unwrap(), 1);
}

#[test]
fn test_unknown_sale_key_is_rejected() {
    let mut persistence: SqlitePersistence = create_people_persistence();
    persistence.add(PendingRow::LineItem {
        sale: SaleKey::new(3),
        item: create_test_line_item(1),
    });

    let result: Result<CommitReceipt, PersistenceError> = persistence.commit();

    assert_eq!(
        result,
        Err(PersistenceError::UnresolvedSaleKey(SaleKey::new(3)))
    );
}

#[test]
fn test_line_item_with_missing_product_rolls_back_its_sale() {
    let mut persistence: SqlitePersistence = create_people_persistence();
    persistence.add(PendingRow::Sale {
        key: SaleKey::new(0),
        sale: create_test_sale(),
    });
    persistence.add(PendingRow::LineItem {
        sale: SaleKey::new(0),
        item: create_test_line_item(999),
    });

    assert!(persistence.commit().is_err());
    assert_eq!(persistence.count(EntityKind::Sale).unwrap(), 0);
    assert_eq!(persistence.count(EntityKind::SaleLineItem).unwrap(), 0);
    assert_eq!(persistence.count(EntityKind::Customer).unwrap(), 1);
}
