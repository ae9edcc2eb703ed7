//! # Store Traits
//!
//! [`ProductStore`] is the only surface the backfill job sees: the four
//! operations the job performs, plus `close`.
//!
//! [`StoreConnector`] performs the acquisition half of the connection
//! lifecycle; `ProductStore::close` performs the release half.

use crate::{ProductId, StoreError};
use async_trait::async_trait;

/// An open connection to a product collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Sets `available_stock` to `default` on every product whose stock is
    /// missing, null, or not positive. Returns how many products changed.
    async fn normalize_stock(&self, default: i32) -> Result<u64, StoreError>;

    /// Identifiers of every product, in the order the store returns them.
    async fn product_ids(&self) -> Result<Vec<ProductId>, StoreError>;

    /// Overwrites the stock of a single product.
    ///
    /// Returns `false` when no product matched `id`.
    async fn set_stock(&self, id: &ProductId, stock: i32) -> Result<bool, StoreError>;

    /// Number of products with `available_stock > 0`.
    async fn count_in_stock(&self) -> Result<u64, StoreError>;

    /// Releases the connection. Calling it more than once is harmless.
    async fn close(&self);
}

/// Opens [`ProductStore`] connections.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    type Store: ProductStore + 'static;

    /// Where the connector points, for logs and progress messages.
    fn address(&self) -> &str;

    /// Opens a connection and confirms the store is reachable.
    async fn connect(&self) -> Result<Self::Store, StoreError>;
}
