//! # Backfill Job
//!
//! The three steps of an inventory backfill, run in order against an open
//! [`ProductStore`]:
//!
//! 1. [`normalize`](BackfillJob::normalize) - one bulk update giving every
//!    product with missing or non-positive stock the default stock.
//! 2. [`randomize`](BackfillJob::randomize) - re-reads every product id and
//!    assigns each a fresh random stock, one update at a time.
//! 3. [`verify`](BackfillJob::verify) - counts products with positive stock.
//!
//! Normalization is idempotent. Randomization is not (every run draws new
//! values) but always leaves stock inside the configured range.
//!
//! The job does not open or close connections; see [`crate::lifecycle`].

mod error;
mod report;

pub use error::*;
pub use report::*;

use crate::config::BackfillConfig;
use inventory_store::ProductStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

/// A configured backfill run.
pub struct BackfillJob<R: Reporter> {
    config: BackfillConfig,
    rng: StdRng,
    reporter: R,
}

impl<R: Reporter> BackfillJob<R> {
    /// Validates `config` and prepares the random source.
    pub fn new(config: BackfillConfig, reporter: R) -> Result<Self, BackfillError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            config,
            rng,
            reporter,
        })
    }

    pub fn config(&self) -> &BackfillConfig {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Runs every step in order, stopping at the first failure.
    pub async fn execute<S>(&mut self, store: &S) -> Result<BackfillReport, BackfillError>
    where
        S: ProductStore + ?Sized,
    {
        let normalized = self.normalize(store).await?;
        let assignment = self.randomize(store).await?;
        let in_stock = self.verify(store, assignment.updated).await?;

        Ok(BackfillReport {
            normalized,
            updated: assignment.updated,
            missing: assignment.missing,
            in_stock,
        })
    }

    /// Gives the default stock to every product that has none.
    #[instrument(skip_all, fields(default_stock = self.config.default_stock))]
    pub async fn normalize<S>(&self, store: &S) -> Result<u64, BackfillError>
    where
        S: ProductStore + ?Sized,
    {
        let modified = store
            .normalize_stock(self.config.default_stock)
            .await
            .map_err(BackfillError::Normalize)?;

        info!(modified, "Normalized out-of-stock products");
        self.reporter.report(&BackfillEvent::Normalized {
            modified,
            default_stock: self.config.default_stock,
        });
        Ok(modified)
    }

    /// Assigns every product a random stock within the configured range.
    ///
    /// Products that vanish between the listing and their update are counted
    /// in [`StockAssignment::missing`] but still count as processed.
    #[instrument(skip_all, fields(range = %self.config.stock_range))]
    pub async fn randomize<S>(&mut self, store: &S) -> Result<StockAssignment, BackfillError>
    where
        S: ProductStore + ?Sized,
    {
        let ids = store
            .product_ids()
            .await
            .map_err(BackfillError::ListProducts)?;

        let mut missing = 0;
        for id in &ids {
            let stock = self.rng.random_range(self.config.stock_range.bounds());
            debug!(%id, stock, "Assigning stock");
            let matched = store
                .set_stock(id, stock)
                .await
                .map_err(|source| BackfillError::AssignStock {
                    id: id.clone(),
                    source,
                })?;
            if !matched {
                warn!(%id, "Product disappeared before its stock could be set");
                missing += 1;
            }
        }

        info!(updated = ids.len(), missing, "Assigned random stock");
        self.reporter.report(&BackfillEvent::Randomized { updated: ids.len() });
        Ok(StockAssignment {
            updated: ids.len(),
            missing,
        })
    }

    /// Counts products with positive stock. `processed` is the number of
    /// products the randomize step touched.
    #[instrument(skip_all, fields(processed = processed))]
    pub async fn verify<S>(&self, store: &S, processed: usize) -> Result<u64, BackfillError>
    where
        S: ProductStore + ?Sized,
    {
        let in_stock = store.count_in_stock().await.map_err(BackfillError::Verify)?;

        if in_stock != processed as u64 {
            warn!(
                in_stock,
                processed,
                "In-stock count differs from processed count; collection changed during the run"
            );
        } else {
            info!(in_stock, "Verified stock levels");
        }
        self.reporter
            .report(&BackfillEvent::Verified { in_stock, processed });
        Ok(in_stock)
    }
}
