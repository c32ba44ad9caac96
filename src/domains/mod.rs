//! Target selection: which DNS records a pass reconciles.
//!
//! Two modes exist. By-comment asks the provider for every record in the
//! default zone whose comment contains a configured marker, so records are
//! enrolled by editing them at the provider. By-file reads a static JSON
//! manifest of zones and domain names and looks each name up individually.
//!
//! The manifest may reference the configured default zone with a `$`
//! placeholder instead of a literal zone id.

mod manifest;
mod source;


pub use manifest::{
    DomainEntry, Manifest, ManifestError, TargetDomain, ZONE_ID_PLACEHOLDER, ZoneEntry,
};
pub use source::{Selector, resolve_targets};
