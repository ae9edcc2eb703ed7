//! # Store Errors
//!
//! Every backend reports failures through [`StoreError`], so the job can tell
//! a refused connection apart from a failed query without knowing which
//! driver produced it.

use std::fmt;

/// Boxed driver error carried as the source of a [`StoreError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The store operation that was running when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    NormalizeStock,
    ListProducts,
    SetStock,
    CountInStock,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOperation::NormalizeStock => "normalize stock",
            StoreOperation::ListProducts => "list products",
            StoreOperation::SetStock => "set stock",
            StoreOperation::CountInStock => "count in-stock products",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while talking to a product store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached, or refused the handshake.
    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: BoxError,
    },

    /// A query or update failed after the connection was established.
    #[error("{operation} failed: {source}")]
    Operation {
        operation: StoreOperation,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    pub fn connect(address: impl Into<String>, source: impl Into<BoxError>) -> Self {
        StoreError::Connect {
            address: address.into(),
            source: source.into(),
        }
    }

    pub fn operation(operation: StoreOperation, source: impl Into<BoxError>) -> Self {
        StoreError::Operation {
            operation,
            source: source.into(),
        }
    }

    /// The operation that failed, or `None` for connection failures.
    pub fn failed_operation(&self) -> Option<StoreOperation> {
        match self {
            StoreError::Connect { .. } => None,
            StoreError::Operation { operation, .. } => Some(*operation),
        }
    }
}
