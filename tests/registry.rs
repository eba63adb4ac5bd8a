use std::sync::Arc;
use std::time::Duration;

use axocom_api::{LoadError, Loaders};
use futures::future;

mod common;

#[tokio::test]
async fn store_failure_rejects_the_whole_window() {
    let pool = common::unreachable_pool();
    let loaders = Loaders::with_delay(&pool, Duration::ZERO);

    let (a, b, c) =
        future::join3(loaders.party.load(1), loaders.party.load(2), loaders.party.load(1)).await;
    let (a, b, c) = (a.unwrap_err(), b.unwrap_err(), c.unwrap_err());

    let shared = a.batch_failure().expect("batch failure");
    assert!(Arc::ptr_eq(shared, b.batch_failure().expect("batch failure")));
    assert!(Arc::ptr_eq(shared, c.batch_failure().expect("batch failure")));
    assert!(matches!(**shared, sqlx::Error::PoolTimedOut));
}

#[tokio::test]
async fn entity_types_dispatch_independently() {
    let pool = common::unreachable_pool();
    let loaders = Loaders::with_delay(&pool, Duration::ZERO);

    let (candidate, constituency) =
        future::join(loaders.candidate.load(1), loaders.constituency.load(1)).await;

    match (candidate, constituency) {
        (Err(LoadError::Batch(a)), Err(LoadError::Batch(b))) => assert!(!Arc::ptr_eq(&a, &b)),
        other => panic!("expected two batch failures, got {:?}", other),
    }
}

#[tokio::test]
async fn failed_keys_are_retried_by_the_next_window() {
    let pool = common::unreachable_pool();
    let loaders = Loaders::new(&pool);

    let first = loaders.election.load(3).await.unwrap_err();
    let second = loaders.election.load(3).await.unwrap_err();
    assert!(!Arc::ptr_eq(
        first.batch_failure().expect("batch failure"),
        second.batch_failure().expect("batch failure"),
    ));
}
