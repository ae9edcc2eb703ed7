//! # MongoDB Backend
//!
//! [`MongoConnector`] builds a driver [`Client`] and pings the target database
//! before handing out a [`MongoProductStore`], so an unreachable server or a
//! rejected login surfaces as [`StoreError::Connect`] rather than on the
//! first query.

use crate::{ProductId, ProductStore, StoreConfig, StoreConnector, StoreError, StoreOperation};
use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument};

const STOCK_FIELD: &str = "available_stock";

/// Projection of a product document down to its `_id`.
#[derive(Debug, Deserialize)]
struct ProductKey {
    #[serde(rename = "_id")]
    id: Bson,
}

/// Opens connections to the product collection described by a [`StoreConfig`].
#[derive(Debug, Clone)]
pub struct MongoConnector {
    config: StoreConfig,
}

impl MongoConnector {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StoreConnector for MongoConnector {
    type Store = MongoProductStore;

    fn address(&self) -> &str {
        &self.config.address
    }

    #[instrument(skip(self), fields(address = %self.config.address, database = %self.config.database_name))]
    async fn connect(&self) -> Result<MongoProductStore, StoreError> {
        let client = Client::with_uri_str(&self.config.address)
            .await
            .map_err(|e| StoreError::connect(&self.config.address, e))?;

        let database = client.database(&self.config.database_name);
        if let Err(e) = database.run_command(doc! { "ping": 1 }).await {
            // The client may already hold pooled sockets; release them before bailing out.
            client.shutdown().await;
            return Err(StoreError::connect(&self.config.address, e));
        }

        info!(collection = %self.config.collection, "Connected to MongoDB");
        Ok(MongoProductStore {
            products: database.collection::<Document>(&self.config.collection),
            client,
            closed: AtomicBool::new(false),
        })
    }
}

/// A live connection to the `products` collection.
pub struct MongoProductStore {
    client: Client,
    products: Collection<Document>,
    closed: AtomicBool,
}

impl MongoProductStore {
    /// Matches products whose stock is missing, null, or not positive.
    fn out_of_stock_filter() -> Document {
        doc! {
            "$or": [
                { STOCK_FIELD: { "$exists": false } },
                { STOCK_FIELD: Bson::Null },
                { STOCK_FIELD: { "$lte": 0 } },
            ]
        }
    }

    /// Overwrites the stock field, leaving the rest of the document alone.
    fn stock_update(stock: i32) -> Document {
        doc! { "$set": { STOCK_FIELD: stock } }
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    #[instrument(skip(self))]
    async fn normalize_stock(&self, default: i32) -> Result<u64, StoreError> {
        let result = self
            .products
            .update_many(
                Self::out_of_stock_filter(),
                Self::stock_update(default),
            )
            .await
            .map_err(|e| StoreError::operation(StoreOperation::NormalizeStock, e))?;

        debug!(
            matched = result.matched_count,
            modified = result.modified_count,
            "Normalized out-of-stock products"
        );
        Ok(result.modified_count)
    }

    #[instrument(skip(self))]
    async fn product_ids(&self) -> Result<Vec<ProductId>, StoreError> {
        let list_error =
            |e: mongodb::error::Error| StoreError::operation(StoreOperation::ListProducts, e);

        let mut cursor = self
            .products
            .clone_with_type::<ProductKey>()
            .find(doc! {})
            .projection(doc! { "_id": 1 })
            .await
            .map_err(list_error)?;

        let mut ids = Vec::new();
        while cursor.advance().await.map_err(list_error)? {
            let key = cursor.deserialize_current().map_err(list_error)?;
            ids.push(ProductId(key.id));
        }

        debug!(count = ids.len(), "Fetched product ids");
        Ok(ids)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn set_stock(&self, id: &ProductId, stock: i32) -> Result<bool, StoreError> {
        let result = self
            .products
            .update_one(
                doc! { "_id": id.as_bson().clone() },
                Self::stock_update(stock),
            )
            .await
            .map_err(|e| StoreError::operation(StoreOperation::SetStock, e))?;

        if result.matched_count == 0 {
            debug!("No product matched");
        }
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn count_in_stock(&self) -> Result<u64, StoreError> {
        self.products
            .count_documents(doc! { STOCK_FIELD: { "$gt": 0 } })
            .await
            .map_err(|e| StoreError::operation(StoreOperation::CountInStock, e))
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.client.clone().shutdown().await;
        info!("MongoDB connection closed");
    }
}
