//! # Inventory Store
//!
//! Storage plumbing for the inventory backfill job. The job never talks to a
//! database driver directly; it talks to the [`ProductStore`] trait, and a
//! [`StoreConnector`] decides which backend sits behind it.
//!
//! ## Layers
//!
//! 1. **Model** ([`model`]) - [`ProductId`], [`StockRange`] and [`StoreConfig`].
//! 2. **Seam** ([`store`]) - the [`ProductStore`] and [`StoreConnector`] traits.
//! 3. **Backends**
//!    - [`mongo`] - the production backend on top of the official `mongodb` driver.
//!    - [`memory`] - an in-memory backend with failure injection, used by tests.
//!
//! ## Example
//!
//! ```rust
//! use inventory_store::memory::{InMemoryConnector, InMemoryProductStore};
//! use inventory_store::{ProductStore, StoreConnector};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = InMemoryProductStore::with_stock([Some(0), None, Some(12)]);
//!     let connector = InMemoryConnector::new(store.clone());
//!
//!     let conn = connector.connect().await.unwrap();
//!     let modified = conn.normalize_stock(100).await.unwrap();
//!     assert_eq!(modified, 2);
//!     assert_eq!(store.stock_levels(), vec![Some(100), Some(100), Some(12)]);
//!
//!     conn.close().await;
//! }
//! ```
//!
//! ## Observability
//!
//! Every store operation is wrapped in a `tracing` span. Call
//! [`tracing::setup_tracing`] once at process start to see them.

pub mod error;
pub mod memory;
pub mod model;
pub mod mongo;
pub mod store;
pub mod tracing;

pub use error::{BoxError, StoreError, StoreOperation};
pub use model::{ProductId, StockRange, StoreConfig};
pub use store::{ProductStore, StoreConnector};
