use inventory_store::memory::{InMemoryConnector, InMemoryProductStore};
use inventory_store::{ProductStore, StoreConnector, StoreOperation};

/// The connector hands out handles that share state with the original store.
#[tokio::test]
async fn test_connected_store_shares_state_with_observer() {
    let observer = InMemoryProductStore::with_stock([Some(-3), Some(12)]);
    let connector = InMemoryConnector::new(observer.clone());

    let store = connector.connect().await.expect("connect");
    store.normalize_stock(100).await.expect("normalize");
    let ids = store.product_ids().await.expect("list");
    store.set_stock(&ids[1], 55).await.expect("set stock");
    store.close().await;

    assert_eq!(observer.stock_levels(), vec![Some(100), Some(55)]);
    assert_eq!(observer.close_count(), 1);
}

/// Ids come back in insertion order and resolve to their own records.
#[tokio::test]
async fn test_product_ids_follow_insertion_order() {
    let store = InMemoryProductStore::new();
    let first = store.insert(Some(5));
    let second = store.insert(None);

    let ids = store.product_ids().await.expect("list");

    assert_eq!(ids, vec![first.clone(), second.clone()]);
    assert_eq!(store.stock_of(&first), Some(5));
    assert_eq!(store.stock_of(&second), None);
}

/// Injected failures only affect the operation they were registered for.
#[tokio::test]
async fn test_injected_failure_is_scoped_to_one_operation() {
    let store =
        InMemoryProductStore::with_stock([Some(0)]).fail_on(StoreOperation::CountInStock);

    assert_eq!(store.normalize_stock(100).await.expect("normalize"), 1);
    let err = store.count_in_stock().await.expect_err("count should fail");

    assert_eq!(err.failed_operation(), Some(StoreOperation::CountInStock));
    assert_eq!(err.to_string(), "count in-stock products failed: injected failure");
}

/// An empty collection is valid for every operation.
#[tokio::test]
async fn test_empty_store_operations_succeed() {
    let store = InMemoryProductStore::new();

    assert!(store.is_empty());
    assert_eq!(store.normalize_stock(100).await.expect("normalize"), 0);
    assert!(store.product_ids().await.expect("list").is_empty());
    assert_eq!(store.count_in_stock().await.expect("count"), 0);
}
