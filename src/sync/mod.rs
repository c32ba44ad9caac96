//! The reconciliation loop and the scheduler that drives it.
//!
//! One pass runs the full pipeline: connectivity gate, public IP
//! discovery, target resolution, then a compare-and-update of each record.
//! Passes are fire-and-forget units of work; nothing is carried between
//! them, so a failed pass simply waits for the next tick.

mod outcome;
mod reconciler;
mod scheduler;


pub use outcome::{PassOutcome, PassSummary, SkipReason};
pub use reconciler::{Reconciler, SyncPlan};
pub use scheduler::{Job, Scheduler};
