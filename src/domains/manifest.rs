//! The static domains manifest file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Zone ids containing this character are replaced wholesale with the
/// configured default zone id when the manifest is flattened.
pub const ZONE_ID_PLACEHOLDER: char = '$';

/// Errors loading the domains manifest.
///
/// At startup these terminate the process; mid-run they skip the pass and
/// the file is retried on the next tick.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The file could not be read.
    #[error("Failed to read domains file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid manifest JSON.
    #[error("Failed to parse domains file {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Root of the manifest document.
///
/// ```json
/// {
///   "zones": [
///     {
///       "id": "$default",
///       "domains": [
///         { "name": "home.example.com", "proxied": false }
///       ]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Zones whose domains are reconciled.
    pub zones: Vec<ZoneEntry>,
}

/// One zone in the manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneEntry {
    /// Zone id, or any string containing [`ZONE_ID_PLACEHOLDER`] to use
    /// the configured default zone.
    pub id: String,
    /// Domains managed inside this zone.
    #[serde(default)]
    pub domains: Vec<DomainEntry>,
}

/// One domain in a zone.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainEntry {
    /// Fully qualified record name to keep updated.
    pub name: String,
    /// Advisory proxy flag; updates never change the provider-side value.
    #[serde(default)]
    pub proxied: bool,
}

/// A manifest entry flattened to a single lookup target, with the owning
/// zone's id resolved and attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDomain {
    /// Zone to query, after placeholder substitution.
    pub zone_id: String,
    /// Record name to look up.
    pub name: String,
    /// Advisory proxy flag from the manifest.
    pub proxied: bool,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// Blocking; callers on the async runtime wrap this in
    /// `spawn_blocking`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Flattens zones into per-domain targets.
    ///
    /// Each domain inherits its zone's id; ids containing
    /// [`ZONE_ID_PLACEHOLDER`] are replaced with `default_zone_id` first.
    #[must_use]
    pub fn targets(&self, default_zone_id: &str) -> Vec<TargetDomain> {
        let mut targets = Vec::new();
        for zone in &self.zones {
            let zone_id = if zone.id.contains(ZONE_ID_PLACEHOLDER) {
                default_zone_id.to_string()
            } else {
                zone.id.clone()
            };
            for domain in &zone.domains {
                targets.push(TargetDomain {
                    zone_id: zone_id.clone(),
                    name: domain.name.clone(),
                    proxied: domain.proxied,
                });
            }
        }
        targets
    }
}
