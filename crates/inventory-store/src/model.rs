//! Data types shared by every store backend.

use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::RangeInclusive;

/// Opaque identifier of a product document.
///
/// The value is whatever the store assigned to `_id` (usually an `ObjectId`).
/// The job only ever hands it back to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub Bson);

impl ProductId {
    pub fn as_bson(&self) -> &Bson {
        &self.0
    }
}

impl From<Bson> for ProductId {
    fn from(value: Bson) -> Self {
        Self(value)
    }
}

impl From<i32> for ProductId {
    fn from(value: i32) -> Self {
        Self(Bson::Int32(value))
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive range of stock levels a product may be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRange {
    pub min: i32,
    pub max: i32,
}

impl StockRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, stock: i32) -> bool {
        self.bounds().contains(&stock)
    }

    pub fn bounds(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

impl Default for StockRange {
    fn default() -> Self {
        Self::new(50, 200)
    }
}

impl Display for StockRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Where the product collection lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub address: String,
    pub database_name: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            address: "mongodb://localhost:27017".to_string(),
            database_name: "dealshare".to_string(),
            collection: "products".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_is_inclusive() {
        let range = StockRange::default();
        assert!(range.contains(50));
        assert!(range.contains(200));
        assert!(!range.contains(49));
        assert!(!range.contains(201));
        assert_eq!(range.to_string(), "[50, 200]");
    }

    #[test]
    fn test_inverted_range_is_invalid() {
        assert!(!StockRange::new(10, 5).is_valid());
        assert!(StockRange::new(7, 7).is_valid());
    }

    #[test]
    fn test_product_id_displays_underlying_value() {
        assert_eq!(ProductId::from(42).to_string(), "42");
    }
}
