//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments and environment variables.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// DNS provider credentials
    #[serde(default)]
    pub provider: ProviderSection,

    /// Record selection configuration
    #[serde(default)]
    pub selection: SelectionSection,

    /// Pass scheduling configuration
    #[serde(default)]
    pub schedule: ScheduleSection,

    /// Log file configuration
    #[serde(default)]
    pub log: LogSection,
}

/// DNS provider credentials section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    /// API token with DNS edit permission
    pub api_token: Option<String>,

    /// Identifier of the zone the records live in
    pub zone_id: Option<String>,
}

/// Record selection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionSection {
    /// Comment marker; selects every record whose comment contains it
    pub comment_key: Option<String>,

    /// Path to a JSON manifest listing the domains to reconcile
    pub domains_file: Option<String>,
}

/// Pass scheduling section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSection {
    /// Minutes between reconciliation passes
    pub interval_minutes: Option<u64>,
}

/// Log file section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// File that warnings and errors are appended to
    pub file: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ddns-sync configuration file
#
# Every value here can also come from the command line or from
# DDNS_SYNC_* environment variables; CLI beats environment beats
# this file.

[provider]
# API token with DNS edit permission for the zone (required)
# api_token = "your-token-here"

# Identifier of the zone the records live in (required)
# zone_id = "023e105f4ecef8ad9ca31a8372d0c353"

[selection]
# One of the two selection modes below is required. When both are set,
# the comment key wins and the domains file is ignored.

# Reconcile every record in the zone whose comment contains this marker.
# comment_key = "ddns"

# Or list the domains explicitly in a JSON manifest. A zone id
# containing "$" stands for the zone_id configured above.
# domains_file = "~/.config/ddns-sync/domains.json"

[schedule]
# Minutes between reconciliation passes (default: 60)
interval_minutes = 60

[log]
# Warnings and errors are appended here (default: ddns-sync.log)
# file = "/var/log/ddns-sync.log"
"#
    .to_string()
}
