//! # Inventory Backfill
//!
//! A one-shot job that repairs the `available_stock` field of every document
//! in a MongoDB product collection.
//!
//! ## Run Sequence
//!
//! 1. **Acquire** a connection ([`lifecycle::BackfillSystem`]).
//! 2. **Normalize**: products with missing or non-positive stock get the
//!    default stock (100).
//! 3. **Randomize**: every product gets a random stock in `[50, 200]`,
//!    one update per product.
//! 4. **Verify**: count products with positive stock.
//! 5. **Release** the connection, on success and failure alike.
//!
//! After a successful run every product's stock lies in the configured range.
//!
//! ## 🗺️ Module Tour
//!
//! - [`config`] - [`BackfillConfig`](config::BackfillConfig): address, database, collection, stock rules.
//! - [`job`] - the steps, their typed errors, and progress reporting.
//! - [`lifecycle`] - scoped connection handling around a job.
//!
//! Storage lives in the `inventory_store` crate: the `ProductStore` trait, the
//! MongoDB backend, and an in-memory backend used by the tests.
//!
//! ## 🚀 Running
//!
//! ```bash
//! # Defaults: mongodb://localhost:27017, database `dealshare`, collection `products`
//! cargo run
//!
//! # Point elsewhere, reproducible draws, with logs
//! INVENTORY_MONGO_URI=mongodb://db:27017 INVENTORY_SEED=7 RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod config;
pub mod job;
pub mod lifecycle;
