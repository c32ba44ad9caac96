//! Application execution logic.
//!
//! Wires the validated configuration into the reconciliation pipeline and
//! drives it on the pass schedule until a shutdown signal arrives.

use thiserror::Error;
use tokio::signal;

use ddns_sync::config::ValidatedConfig;
use ddns_sync::domains::{Manifest, ManifestError, Selector};
use ddns_sync::ipecho::PublicIpResolver;
use ddns_sync::net::{ReqwestClient, TcpProbe};
use ddns_sync::provider::CloudflareApi;
use ddns_sync::sync::{Reconciler, Scheduler, SyncPlan};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configured domains manifest failed its startup check.
    #[error("Domains manifest check failed: {0}")]
    Manifest(#[source] ManifestError),
}

/// Executes the reconciliation loop.
///
/// This function:
/// 1. Checks that a configured domains manifest is loadable
/// 2. Builds the probe, resolver, and provider client over one HTTP client
/// 3. Runs the scheduler until a shutdown signal (Ctrl+C or SIGTERM)
///
/// # Errors
///
/// Returns an error if a configured domains manifest cannot be loaded at
/// startup. Manifest failures after startup only skip the affected pass.
///
/// # Coverage Note
///
/// Excluded from coverage because it runs the scheduler until an OS
/// signal arrives.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    preflight(&config.selector).await?;

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - updates will be logged but not applied");
    }

    let client = ReqwestClient::new();
    let store = CloudflareApi::new(client.clone(), config.api_token.clone());
    let resolver = PublicIpResolver::new(client);
    let probe = TcpProbe::default();
    let reconciler = Reconciler::new(probe, resolver, store, plan(&config));

    tracing::info!(
        "Reconciling {} every {} minute(s)",
        config.selector,
        config.interval.as_secs() / 60
    );

    Scheduler::new(config.interval)
        .run(&reconciler, shutdown_signal())
        .await;

    Ok(())
}

/// Extracts the per-pass plan from the validated configuration.
fn plan(config: &ValidatedConfig) -> SyncPlan {
    SyncPlan {
        zone_id: config.zone_id.clone(),
        selector: config.selector.clone(),
        dry_run: config.dry_run,
    }
}

/// Verifies at startup that a by-file selection can actually load its
/// manifest, so a typoed path fails fast instead of skipping every pass.
async fn preflight(selector: &Selector) -> Result<(), RunError> {
    let Selector::ByFile { path } = selector else {
        return Ok(());
    };

    let path = path.clone();
    let manifest = tokio::task::spawn_blocking(move || Manifest::load(&path))
        .await
        .expect("spawn_blocking task panicked")
        .map_err(RunError::Manifest)?;

    tracing::debug!("Domains manifest loaded: {} zone(s)", manifest.zones.len());
    Ok(())
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
