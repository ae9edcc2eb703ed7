//! # Progress Reporting
//!
//! The job announces each completed step through a [`Reporter`]. Operators
//! read how far a failed run got from which lines were printed.
//!
//! - [`ConsoleReporter`] prints progress to stdout and failures to stderr.
//! - [`RecordingReporter`] keeps everything in memory for tests.

use super::BackfillError;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A step of the backfill completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BackfillEvent {
    Connected { address: String },
    Normalized { modified: u64, default_stock: i32 },
    Randomized { updated: usize },
    Verified { in_stock: u64, processed: usize },
}

impl fmt::Display for BackfillEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackfillEvent::Connected { address } => write!(f, "✅ Connected to MongoDB at {address}"),
            BackfillEvent::Normalized {
                modified,
                default_stock,
            } => write!(
                f,
                "✅ Normalized {modified} out-of-stock products to {default_stock}"
            ),
            BackfillEvent::Randomized { updated } => {
                write!(f, "✅ Updated {updated} products with inventory")
            }
            BackfillEvent::Verified { in_stock, .. } => {
                write!(f, "✅ {in_stock} products now have stock!")
            }
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    /// Products raised to the default stock in the normalization step.
    pub normalized: u64,
    /// Products whose stock was resampled.
    pub updated: usize,
    /// Products listed for resampling that no longer existed.
    pub missing: usize,
    /// Products with positive stock after the run.
    pub in_stock: u64,
}

/// Outcome of the randomize step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockAssignment {
    /// Products processed, vanished ones included.
    pub updated: usize,
    pub missing: usize,
}

/// Receives progress and failure notifications from a run.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &BackfillEvent);

    fn failed(&self, error: &BackfillError);
}

/// Prints progress lines to stdout and failures to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: &BackfillEvent) {
        println!("{event}");
    }

    fn failed(&self, error: &BackfillError) {
        eprintln!("❌ Error: {error}");
    }
}

#[derive(Debug, Default)]
struct Recorded {
    events: Vec<BackfillEvent>,
    failures: Vec<String>,
}

/// Collects events and failure messages; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BackfillEvent> {
        self.lock().events.clone()
    }

    /// Progress lines as they would have been printed.
    pub fn lines(&self) -> Vec<String> {
        self.lock().events.iter().map(ToString::to_string).collect()
    }

    pub fn failures(&self) -> Vec<String> {
        self.lock().failures.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &BackfillEvent) {
        self.lock().events.push(event.clone());
    }

    fn failed(&self, error: &BackfillError) {
        self.lock().failures.push(error.to_string());
    }
}
