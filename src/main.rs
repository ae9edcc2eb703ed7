//! # Inventory Backfill
//!
//! Entry point: builds the configuration, connects to MongoDB, runs the
//! backfill, and maps the outcome to the process exit code.
//!
//! Progress goes to stdout, failures to stderr, and `tracing` logs (enable
//! with `RUST_LOG`) to stderr.

use inventory_backfill::config::BackfillConfig;
use inventory_backfill::job::{BackfillJob, ConsoleReporter, Reporter};
use inventory_backfill::lifecycle::BackfillSystem;
use inventory_store::mongo::MongoConnector;
use inventory_store::tracing::setup_tracing;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    // Setup tracing once for the entire application
    setup_tracing();

    let reporter = ConsoleReporter;
    let job = match BackfillConfig::default()
        .with_env_overrides()
        .and_then(|config| BackfillJob::new(config, reporter))
    {
        Ok(job) => job,
        Err(e) => {
            reporter.failed(&e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        address = %job.config().store.address,
        database = %job.config().store.database_name,
        collection = %job.config().store.collection,
        "Starting inventory backfill"
    );

    let system = BackfillSystem::new(MongoConnector::new(job.config().store.clone()));
    match system.run(job).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
