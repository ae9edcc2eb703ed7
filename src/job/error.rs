//! Error types for the backfill job.

use inventory_store::{ProductId, StoreError};
use std::fmt;

/// The stage of a run at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillStep {
    Configure,
    Connect,
    Normalize,
    Randomize,
    Verify,
}

impl fmt::Display for BackfillStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackfillStep::Configure => "configure",
            BackfillStep::Connect => "connect",
            BackfillStep::Normalize => "normalize",
            BackfillStep::Randomize => "randomize",
            BackfillStep::Verify => "verify",
        };
        f.write_str(name)
    }
}

/// Errors that can end a backfill run.
///
/// Each step has its own variant, so callers can tell how far a failed run
/// got without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum BackfillError {
    /// The configuration was rejected before connecting.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not acquire a store connection: {0}")]
    Connect(#[source] StoreError),

    #[error("normalizing out-of-stock products failed: {0}")]
    Normalize(#[source] StoreError),

    #[error("listing products failed: {0}")]
    ListProducts(#[source] StoreError),

    #[error("assigning stock to product {id} failed: {source}")]
    AssignStock {
        id: ProductId,
        #[source]
        source: StoreError,
    },

    #[error("counting in-stock products failed: {0}")]
    Verify(#[source] StoreError),

    /// The job task panicked or was cancelled.
    #[error("backfill task aborted: {0}")]
    Aborted(String),
}

impl BackfillError {
    /// The step that failed; `None` when the job task itself died.
    pub fn step(&self) -> Option<BackfillStep> {
        match self {
            BackfillError::Config(_) => Some(BackfillStep::Configure),
            BackfillError::Connect(_) => Some(BackfillStep::Connect),
            BackfillError::Normalize(_) => Some(BackfillStep::Normalize),
            BackfillError::ListProducts(_) | BackfillError::AssignStock { .. } => {
                Some(BackfillStep::Randomize)
            }
            BackfillError::Verify(_) => Some(BackfillStep::Verify),
            BackfillError::Aborted(_) => None,
        }
    }

    /// The underlying store error, if the failure came from the store.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            BackfillError::Connect(e)
            | BackfillError::Normalize(e)
            | BackfillError::ListProducts(e)
            | BackfillError::Verify(e) => Some(e),
            BackfillError::AssignStock { source, .. } => Some(source),
            BackfillError::Config(_) | BackfillError::Aborted(_) => None,
        }
    }
}
