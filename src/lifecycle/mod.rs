//! # Connection Lifecycle
//!
//! [`BackfillSystem`] owns the acquire/run/release sequence of a backfill:
//!
//! 1. **Acquire** a store connection through the [`StoreConnector`].
//! 2. **Run** the [`BackfillJob`] in its own Tokio task.
//! 3. **Release** the connection, whether the job succeeded, returned an
//!    error, or panicked.
//!
//! Failures are logged at `warn` level, handed to the job's [`Reporter`], and
//! returned to the caller as a typed [`BackfillError`].

use crate::job::{BackfillError, BackfillEvent, BackfillJob, BackfillReport, Reporter};
use inventory_store::{ProductStore, StoreConnector};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// Runs backfill jobs against connections opened by `C`.
///
/// # Example
///
/// ```ignore
/// let system = BackfillSystem::new(MongoConnector::new(config.store.clone()));
/// let job = BackfillJob::new(config, ConsoleReporter)?;
/// let report = system.run(job).await?;
/// ```
pub struct BackfillSystem<C: StoreConnector> {
    connector: C,
}

impl<C: StoreConnector> BackfillSystem<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Runs `job` inside a scoped connection.
    ///
    /// The connection is closed exactly once on every path that opened one.
    /// On failure the error is reported before it is returned.
    pub async fn run<R>(&self, job: BackfillJob<R>) -> Result<BackfillReport, BackfillError>
    where
        R: Reporter + Clone + 'static,
    {
        let reporter = job.reporter().clone();
        let span = info_span!("backfill", address = %self.connector.address());

        let outcome = self.run_scoped(job).instrument(span).await;
        match &outcome {
            Ok(report) => info!(
                normalized = report.normalized,
                updated = report.updated,
                in_stock = report.in_stock,
                "Backfill completed"
            ),
            Err(e) => {
                warn!(error = %e, step = ?e.step(), "Backfill failed");
                reporter.failed(e);
            }
        }
        outcome
    }

    async fn run_scoped<R>(&self, job: BackfillJob<R>) -> Result<BackfillReport, BackfillError>
    where
        R: Reporter + 'static,
    {
        // =====================================================================
        // Step 1: Acquire
        // =====================================================================

        let store = match self.connector.connect().await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                debug!("No connection was opened; nothing to release");
                return Err(BackfillError::Connect(e));
            }
        };

        // =====================================================================
        // Step 2: Run the job in its own task
        // =====================================================================

        // Everything between acquire and release runs in the task, so a panic
        // (including one while printing progress) surfaces as a JoinError
        // instead of unwinding past the release below.
        let task = {
            let store = Arc::clone(&store);
            let connected = BackfillEvent::Connected {
                address: self.connector.address().to_string(),
            };
            let mut job = job;
            tokio::spawn(
                async move {
                    job.reporter().report(&connected);
                    job.execute(store.as_ref()).await
                }
                .in_current_span(),
            )
        };
        let outcome = match task.await {
            Ok(result) => result,
            Err(e) => Err(BackfillError::Aborted(e.to_string())),
        };

        // =====================================================================
        // Step 3: Release
        // =====================================================================

        store.close().await;
        info!("Store connection released");
        outcome
    }
}
