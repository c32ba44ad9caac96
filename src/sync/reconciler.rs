//! One reconciliation pass: gate, discover, resolve, compare, update.

use super::scheduler::Job;
use super::{PassOutcome, PassSummary, SkipReason};
use crate::domains::{Selector, resolve_targets};
use crate::ipecho::IpResolver;
use crate::net::ConnectivityProbe;
use crate::provider::{DnsRecord, RecordStore};

/// What a pass reconciles, fixed at startup from the validated
/// configuration.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    /// Zone queried by the comment selector; also substituted for
    /// manifest placeholder ids.
    pub zone_id: String,
    /// How target records are chosen.
    pub selector: Selector,
    /// Log intended updates without performing them.
    pub dry_run: bool,
}

/// Runs reconciliation passes against injected network seams.
///
/// Holds no mutable state: every pass starts from scratch, so a skipped
/// or partially failed pass needs no cleanup before the next tick.
#[derive(Debug)]
pub struct Reconciler<P, R, S> {
    probe: P,
    resolver: R,
    store: S,
    plan: SyncPlan,
}

impl<P, R, S> Reconciler<P, R, S>
where
    P: ConnectivityProbe,
    R: IpResolver,
    S: RecordStore,
{
    /// Creates a reconciler executing `plan` through the given seams.
    pub const fn new(probe: P, resolver: R, store: S, plan: SyncPlan) -> Self {
        Self {
            probe,
            resolver,
            store,
            plan,
        }
    }

    /// Runs a single pass to its terminal state.
    ///
    /// Never fails as such: everything that can go wrong either skips the
    /// pass ([`PassOutcome::Skipped`]) or is counted in the summary of a
    /// completed one.
    pub async fn run_pass(&self) -> PassOutcome {
        if !self.probe.check().await {
            tracing::error!("No internet connection; skipping this pass");
            return PassOutcome::Skipped(SkipReason::Offline);
        }

        let public_ip = match self.resolver.resolve().await {
            Ok(ip) => ip,
            Err(e) => {
                tracing::error!("{e}");
                return PassOutcome::Skipped(SkipReason::IpUnavailable);
            }
        };
        tracing::info!("Current public IP: {public_ip}");

        let records =
            match resolve_targets(&self.store, &self.plan.selector, &self.plan.zone_id).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::error!("{e}");
                    return PassOutcome::Skipped(SkipReason::ManifestUnavailable);
                }
            };
        tracing::info!("Found {} record(s) to reconcile", records.len());

        let mut summary = PassSummary::new(public_ip);
        let content = public_ip.to_string();
        for record in &records {
            self.reconcile_record(record, &content, &mut summary).await;
        }

        PassOutcome::Completed(summary)
    }

    /// Compares one record against the public IP and updates it if stale.
    ///
    /// Failures are counted and logged; they never affect the remaining
    /// records.
    async fn reconcile_record(&self, record: &DnsRecord, content: &str, summary: &mut PassSummary) {
        if record.content == content {
            tracing::info!(
                "{} ({}) already points at {content}; no update needed",
                record.name,
                record.record_type
            );
            summary.unchanged += 1;
            return;
        }

        if self.plan.dry_run {
            tracing::info!(
                "Dry-run: would update {} ({}) {} -> {content}",
                record.name,
                record.record_type,
                record.content
            );
            summary.updated += 1;
            return;
        }

        match self.store.update_content(record, content).await {
            Ok(()) => {
                tracing::info!(
                    "DNS record updated: {} ({}) {} -> {content}",
                    record.name,
                    record.record_type,
                    record.content
                );
                summary.updated += 1;
            }
            Err(e) => {
                tracing::error!("Failed to update {} ({}): {e}", record.name, record.record_type);
                summary.failed += 1;
            }
        }
    }
}

impl<P, R, S> Job for Reconciler<P, R, S>
where
    P: ConnectivityProbe,
    R: IpResolver,
    S: RecordStore,
{
    async fn execute(&self) {
        match self.run_pass().await {
            PassOutcome::Completed(summary) => tracing::info!("Pass complete: {summary}"),
            PassOutcome::Skipped(reason) => tracing::warn!("Pass skipped: {reason}"),
        }
    }
}
