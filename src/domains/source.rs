//! Resolution of the record set a pass will reconcile.

use std::fmt;
use std::path::{Path, PathBuf};

use super::{Manifest, ManifestError};
use crate::provider::{DnsRecord, RecordStore};

/// How the records to reconcile are selected.
///
/// Exactly one mode is active per process, fixed at startup by the
/// configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Query the default zone for records whose comment contains `marker`.
    ByComment {
        /// Substring matched against record comments provider-side.
        marker: String,
    },
    /// Load the manifest at `path` and look up each listed domain by name.
    ByFile {
        /// Manifest location, already tilde-expanded.
        path: PathBuf,
    },
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByComment { marker } => write!(f, "records commented with {marker:?}"),
            Self::ByFile { path } => write!(f, "domains file {}", path.display()),
        }
    }
}

/// Resolves the records to reconcile for one pass.
///
/// Failures below the selection level never propagate: a failed comment
/// query yields an empty set, and a domain whose lookup fails or matches
/// nothing is dropped, both with logged errors. Only a broken manifest
/// file aborts, since without it the target set is unknowable.
///
/// # Errors
///
/// Returns [`ManifestError`] when the by-file manifest cannot be read or
/// parsed.
pub async fn resolve_targets<S: RecordStore>(
    store: &S,
    selector: &Selector,
    default_zone_id: &str,
) -> Result<Vec<DnsRecord>, ManifestError> {
    match selector {
        Selector::ByComment { marker } => Ok(by_comment(store, default_zone_id, marker).await),
        Selector::ByFile { path } => by_file(store, path, default_zone_id).await,
    }
}

async fn by_comment<S: RecordStore>(store: &S, zone_id: &str, marker: &str) -> Vec<DnsRecord> {
    match store.list_by_comment(zone_id, marker).await {
        Ok(records) => {
            if records.is_empty() {
                tracing::warn!("No records in zone {zone_id} carry the comment marker {marker:?}");
            }
            records
        }
        Err(e) => {
            tracing::error!("Comment query against zone {zone_id} failed: {e}");
            Vec::new()
        }
    }
}

async fn by_file<S: RecordStore>(
    store: &S,
    path: &Path,
    default_zone_id: &str,
) -> Result<Vec<DnsRecord>, ManifestError> {
    // Reread every pass so manifest edits take effect without a restart.
    let owned = path.to_path_buf();
    let manifest = tokio::task::spawn_blocking(move || Manifest::load(&owned))
        .await
        .expect("spawn_blocking task panicked")?;

    let targets = manifest.targets(default_zone_id);
    let mut records = Vec::with_capacity(targets.len());
    for target in &targets {
        match store.find_record(&target.zone_id, &target.name).await {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {
                tracing::error!(
                    "No DNS record found for {} in zone {}; dropping it from this pass",
                    target.name,
                    target.zone_id
                );
            }
            Err(e) => {
                tracing::error!("Record lookup for {} failed: {e}", target.name);
            }
        }
    }
    Ok(records)
}
