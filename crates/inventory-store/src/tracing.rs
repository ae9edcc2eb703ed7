/// Initializes the tracing/logging infrastructure for the application.
///
/// This sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG` environment variable
/// - **stderr output**: stdout stays reserved for the operator-facing progress lines
/// - **Span tracking**: every store operation runs inside its own span
///
/// # Environment Variables
///
/// Set `RUST_LOG` to control log verbosity:
/// - `RUST_LOG=info` - Connection open/close and step summaries
/// - `RUST_LOG=debug` - Per-operation counts
/// - `RUST_LOG=inventory_store=debug,mongodb=info` - Driver internals as well
///
/// Calling it more than once is a no-op.
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Backfill started");
/// ```
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
