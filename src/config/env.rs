//! Environment variable configuration source.
//!
//! Sits between the CLI and the TOML file in merge priority, so a token
//! can live in a service manager's environment instead of a file or a
//! process listing.

use std::path::PathBuf;

/// Environment variable names read at startup.
pub mod vars {
    /// Provider API token.
    pub const API_TOKEN: &str = "DDNS_SYNC_API_TOKEN";
    /// DNS zone identifier.
    pub const ZONE_ID: &str = "DDNS_SYNC_ZONE_ID";
    /// Comment marker for record selection.
    pub const COMMENT_KEY: &str = "DDNS_SYNC_COMMENT_KEY";
    /// Path to the domains manifest.
    pub const DOMAINS_FILE: &str = "DDNS_SYNC_DOMAINS_FILE";
    /// Minutes between passes.
    pub const INTERVAL_MINUTES: &str = "DDNS_SYNC_INTERVAL_MINUTES";
    /// Warning log file path.
    pub const LOG_FILE: &str = "DDNS_SYNC_LOG_FILE";
}

/// Raw values captured from the environment.
///
/// The interval is kept as the raw string; it is parsed during merging so
/// a bad environment value fails validation the same way a bad TOML value
/// would.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    /// Provider API token.
    pub api_token: Option<String>,
    /// DNS zone identifier.
    pub zone_id: Option<String>,
    /// Comment marker for record selection.
    pub comment_key: Option<String>,
    /// Path to the domains manifest.
    pub domains_file: Option<PathBuf>,
    /// Minutes between passes, unparsed.
    pub interval_minutes: Option<String>,
    /// Warning log file path.
    pub log_file: Option<PathBuf>,
}

impl EnvConfig {
    /// Captures the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Captures variables through an arbitrary lookup.
    ///
    /// Tests pass a closure over a map instead of mutating the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_token: lookup(vars::API_TOKEN),
            zone_id: lookup(vars::ZONE_ID),
            comment_key: lookup(vars::COMMENT_KEY),
            domains_file: lookup(vars::DOMAINS_FILE).map(PathBuf::from),
            interval_minutes: lookup(vars::INTERVAL_MINUTES),
            log_file: lookup(vars::LOG_FILE).map(PathBuf::from),
        }
    }
}
