// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, IdentifierPool};

#[test]
fn test_pool_bounds_are_inclusive() {
    let pool = IdentifierPool::new(1, 1000).unwrap();
    assert_eq!(pool.len(), 1000);
    assert!(pool.contains(1));
    assert!(pool.contains(1000));
    assert!(!pool.contains(0));
    assert!(!pool.contains(1001));
}

#[test]
fn test_single_identifier_pool() {
    let pool = IdentifierPool::new(7, 7).unwrap();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.nth(0), Some(7));
    assert_eq!(pool.nth(1), None);
}

#[test]
fn test_inverted_pool_is_rejected() {
    assert_eq!(
        IdentifierPool::new(10, 5),
        Err(DomainError::InvalidPool { first: 10, last: 5 })
    );
}

#[test]
fn test_non_positive_pool_is_rejected() {
    assert!(IdentifierPool::new(0, 5).is_err());
    assert!(IdentifierPool::new(-3, 5).is_err());
}

#[test]
fn test_check_returns_out_of_pool_error() {
    let pool = IdentifierPool::new(1, 100).unwrap();
    assert_eq!(pool.check(42), Ok(42));
    assert_eq!(
        pool.check(101),
        Err(DomainError::IdentifierOutOfPool {
            id: 101,
            first: 1,
            last: 100
        })
    );
}

#[test]
fn test_nth_walks_from_first() {
    let pool = IdentifierPool::new(5, 9).unwrap();
    let ids: Vec<i64> = (0..pool.len()).filter_map(|i| pool.nth(i)).collect();
    assert_eq!(ids, vec![5, 6, 7, 8, 9]);
}

#[test]
fn test_pool_deserialization_validates_bounds() {
    let ok: IdentifierPool = serde_json::from_str(r#"{"first": 1, "last": 100}"#).unwrap();
    assert_eq!(ok.last(), 100);

    let bad: Result<IdentifierPool, _> = serde_json::from_str(r#"{"first": 100, "last": 1}"#);
    assert!(bad.is_err());
}
