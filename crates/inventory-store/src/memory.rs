//! # In-Memory Store
//!
//! A [`ProductStore`] backed by a `Vec`, with the same filtering rules as the
//! MongoDB backend. Intended for tests.
//!
//! Clones share state, so a test can keep one handle for assertions while the
//! job owns another:
//!
//! ```rust
//! use inventory_store::memory::InMemoryProductStore;
//! use inventory_store::StoreOperation;
//!
//! let store = InMemoryProductStore::with_stock([Some(3), Some(-1)])
//!     .fail_after(StoreOperation::SetStock, 1);
//! let observer = store.clone();
//! assert_eq!(observer.len(), 2);
//! ```

use crate::{ProductId, ProductStore, StoreConnector, StoreError, StoreOperation};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
struct Record {
    id: ProductId,
    available_stock: Option<i32>,
}

#[derive(Debug, Default)]
struct State {
    records: Vec<Record>,
    next_id: i32,
    /// Successful calls still allowed per operation before it starts failing.
    failures: HashMap<StoreOperation, usize>,
    set_stock_calls: usize,
    closes: usize,
}

impl State {
    fn check(&mut self, operation: StoreOperation) -> Result<(), StoreError> {
        match self.failures.get_mut(&operation) {
            Some(0) => Err(StoreError::operation(operation, "injected failure")),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Shared, cloneable in-memory product collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one product per entry, ids assigned from 1.
    pub fn with_stock(levels: impl IntoIterator<Item = Option<i32>>) -> Self {
        let store = Self::new();
        for level in levels {
            store.insert(level);
        }
        store
    }

    /// Adds a product and returns its id.
    pub fn insert(&self, available_stock: Option<i32>) -> ProductId {
        let mut state = self.lock();
        state.next_id += 1;
        let id = ProductId::from(state.next_id);
        state.records.push(Record {
            id: id.clone(),
            available_stock,
        });
        id
    }

    /// Makes `operation` fail on every call.
    pub fn fail_on(self, operation: StoreOperation) -> Self {
        self.fail_after(operation, 0)
    }

    /// Lets `operation` succeed `successes` times, then fail on every call.
    pub fn fail_after(self, operation: StoreOperation, successes: usize) -> Self {
        self.lock().failures.insert(operation, successes);
        self
    }

    /// Current stock of every product, in insertion order.
    pub fn stock_levels(&self) -> Vec<Option<i32>> {
        self.lock()
            .records
            .iter()
            .map(|r| r.available_stock)
            .collect()
    }

    pub fn stock_of(&self, id: &ProductId) -> Option<i32> {
        self.lock()
            .records
            .iter()
            .find(|r| &r.id == id)
            .and_then(|r| r.available_stock)
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times `set_stock` was called, failed calls included.
    pub fn set_stock_calls(&self) -> usize {
        self.lock().set_stock_calls
    }

    /// How many times `close` was called.
    pub fn close_count(&self) -> usize {
        self.lock().closes
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    #[instrument(skip(self))]
    async fn normalize_stock(&self, default: i32) -> Result<u64, StoreError> {
        let mut state = self.lock();
        state.check(StoreOperation::NormalizeStock)?;

        let mut modified = 0;
        for record in state.records.iter_mut() {
            if record.available_stock.map_or(true, |stock| stock <= 0) {
                record.available_stock = Some(default);
                modified += 1;
            }
        }
        debug!(modified, "Normalized out-of-stock products");
        Ok(modified)
    }

    #[instrument(skip(self))]
    async fn product_ids(&self) -> Result<Vec<ProductId>, StoreError> {
        let mut state = self.lock();
        state.check(StoreOperation::ListProducts)?;
        Ok(state.records.iter().map(|r| r.id.clone()).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn set_stock(&self, id: &ProductId, stock: i32) -> Result<bool, StoreError> {
        let mut state = self.lock();
        state.set_stock_calls += 1;
        state.check(StoreOperation::SetStock)?;

        match state.records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.available_stock = Some(stock);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn count_in_stock(&self) -> Result<u64, StoreError> {
        let mut state = self.lock();
        state.check(StoreOperation::CountInStock)?;
        let count = state
            .records
            .iter()
            .filter(|r| r.available_stock.is_some_and(|stock| stock > 0))
            .count();
        Ok(count as u64)
    }

    async fn close(&self) {
        self.lock().closes += 1;
    }
}

/// Hands out clones of an [`InMemoryProductStore`], or refuses to connect.
#[derive(Debug, Clone)]
pub struct InMemoryConnector {
    store: InMemoryProductStore,
    address: String,
    refusal: Option<String>,
}

impl InMemoryConnector {
    pub fn new(store: InMemoryProductStore) -> Self {
        Self {
            store,
            address: "memory://products".to_string(),
            refusal: None,
        }
    }

    /// A connector whose every `connect` fails with `reason`.
    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            refusal: Some(reason.into()),
            ..Self::new(InMemoryProductStore::new())
        }
    }
}

#[async_trait]
impl StoreConnector for InMemoryConnector {
    type Store = InMemoryProductStore;

    fn address(&self) -> &str {
        &self.address
    }

    async fn connect(&self) -> Result<InMemoryProductStore, StoreError> {
        match &self.refusal {
            Some(reason) => Err(StoreError::connect(&self.address, reason.clone())),
            None => Ok(self.store.clone()),
        }
    }
}
