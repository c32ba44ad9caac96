//! Fixed-interval scheduling of reconciliation passes.

use std::future::Future;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

/// A unit of work the scheduler drives once per tick.
///
/// Implementations must be infallible; anything that can go wrong inside
/// a tick is the job's business to log and absorb.
pub trait Job: Send + Sync {
    /// Runs the job to completion.
    fn execute(&self) -> impl Future<Output = ()> + Send;
}

/// Runs a job immediately and then at a fixed interval until shutdown.
///
/// Ticks are strictly serialized: each job run is awaited before the next
/// tick is considered, so a run that outlives the interval delays
/// subsequent ticks instead of stacking them. The shutdown future is
/// honored between runs, never mid-run.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    /// Creates a scheduler firing every `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Drives `job` until `shutdown` resolves.
    ///
    /// The first tick fires immediately, so the job runs once at startup
    /// without waiting out a full interval.
    pub async fn run<J: Job>(&self, job: &J, shutdown: impl Future<Output = ()>) {
        let mut timer = interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = IntervalStream::new(timer);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping...");
                    return;
                }

                Some(_) = ticks.next() => {
                    tracing::info!("Run triggered by schedule");
                    job.execute().await;
                }
            }
        }
    }
}
