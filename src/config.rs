//! # Backfill Configuration
//!
//! Everything the job needs is carried by [`BackfillConfig`], built once and
//! passed in at construction. The defaults point at a local `dealshare`
//! database; the binary layers optional environment overrides on top with
//! [`BackfillConfig::with_env_overrides`].

use crate::job::BackfillError;
use inventory_store::{StockRange, StoreConfig};
use serde::{Deserialize, Serialize};

pub const ENV_ADDRESS: &str = "INVENTORY_MONGO_URI";
pub const ENV_DATABASE: &str = "INVENTORY_DB_NAME";
pub const ENV_COLLECTION: &str = "INVENTORY_COLLECTION";
pub const ENV_SEED: &str = "INVENTORY_SEED";

/// Configuration of a single backfill run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillConfig {
    pub store: StoreConfig,
    /// Stock given to products that have none (or a non-positive amount).
    pub default_stock: i32,
    /// Range every product's stock is resampled from.
    pub stock_range: StockRange,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            default_stock: 100,
            stock_range: StockRange::default(),
            seed: None,
        }
    }
}

impl BackfillConfig {
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.store.address = address.into();
        self
    }

    pub fn with_database(mut self, database_name: impl Into<String>) -> Self {
        self.store.database_name = database_name.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.store.collection = collection.into();
        self
    }

    pub fn with_stock_range(mut self, range: StockRange) -> Self {
        self.stock_range = range;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, BackfillError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; keys that resolve to `None` keep their
    /// current value.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, BackfillError> {
        if let Some(address) = lookup(ENV_ADDRESS) {
            self.store.address = address;
        }
        if let Some(database_name) = lookup(ENV_DATABASE) {
            self.store.database_name = database_name;
        }
        if let Some(collection) = lookup(ENV_COLLECTION) {
            self.store.collection = collection;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed
                .trim()
                .parse()
                .map_err(|_| BackfillError::Config(format!("{ENV_SEED} is not a u64: {seed:?}")))?;
            self.seed = Some(seed);
        }
        Ok(self)
    }

    /// Rejects configurations that could not satisfy the post-run invariant.
    pub fn validate(&self) -> Result<(), BackfillError> {
        if self.store.address.trim().is_empty() {
            return Err(BackfillError::Config("store address is empty".into()));
        }
        if self.store.database_name.trim().is_empty() {
            return Err(BackfillError::Config("database name is empty".into()));
        }
        if self.store.collection.trim().is_empty() {
            return Err(BackfillError::Config("collection name is empty".into()));
        }
        if !self.stock_range.is_valid() {
            return Err(BackfillError::Config(format!(
                "stock range {} is empty",
                self.stock_range
            )));
        }
        if self.stock_range.min <= 0 {
            return Err(BackfillError::Config(format!(
                "stock range {} must be strictly positive",
                self.stock_range
            )));
        }
        if self.default_stock <= 0 {
            return Err(BackfillError::Config(format!(
                "default stock {} must be positive",
                self.default_stock
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_target_local_dealshare_products() {
        let config = BackfillConfig::default();
        assert_eq!(config.store.address, "mongodb://localhost:27017");
        assert_eq!(config.store.database_name, "dealshare");
        assert_eq!(config.store.collection, "products");
        assert_eq!(config.default_stock, 100);
        assert_eq!(config.stock_range, StockRange::new(50, 200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_replace_only_present_keys() {
        let env: HashMap<&str, &str> = [
            (ENV_DATABASE, "staging"),
            (ENV_SEED, " 42 "),
        ]
        .into_iter()
        .collect();

        let config = BackfillConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.store.address, "mongodb://localhost:27017");
        assert_eq!(config.store.database_name, "staging");
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_bad_seed_is_a_config_error() {
        let err = BackfillConfig::default()
            .with_overrides(|key| (key == ENV_SEED).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, BackfillError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_ranges_that_allow_zero_stock() {
        let config = BackfillConfig::default().with_stock_range(StockRange::new(0, 10));
        assert!(matches!(config.validate(), Err(BackfillError::Config(_))));

        let config = BackfillConfig::default().with_stock_range(StockRange::new(20, 10));
        assert!(matches!(config.validate(), Err(BackfillError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_collection() {
        let config = BackfillConfig::default().with_collection("  ");
        assert!(config.validate().is_err());
    }
}
