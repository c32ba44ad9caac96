//! Validated configuration after merging CLI, environment, and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domains::Selector;

use super::cli::Cli;
use super::defaults;
use super::env::EnvConfig;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from the three raw sources,
/// or [`ValidatedConfig::load`] to read the environment and optional config
/// file behind the CLI arguments. Values are resolved field by field with
/// priority CLI > environment > TOML file > built-in defaults.
pub struct ValidatedConfig {
    /// Provider API token (required)
    pub api_token: String,

    /// Identifier of the zone the records live in (required)
    pub zone_id: String,

    /// How the records to reconcile are selected (required)
    pub selector: Selector,

    /// Time between reconciliation passes
    pub interval: Duration,

    /// File that warnings and errors are appended to
    pub log_file: PathBuf,

    /// Dry-run mode (log intended updates without performing them)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("api_token", &"<redacted>")
            .field("zone_id", &self.zone_id)
            .field("selector", &self.selector)
            .field("interval", &self.interval)
            .field("log_file", &self.log_file)
            .field("dry_run", &self.dry_run)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ zone: {}, selection: {}, interval: {}m, log_file: {}, dry_run: {} }}",
            self.zone_id,
            self.selector,
            self.interval.as_secs() / 60,
            self.log_file.display(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from the three raw sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API token or zone id is missing from every source
    /// - Neither a comment key nor a domains file is configured
    /// - The interval is zero or not a whole number of minutes
    pub fn from_raw(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<Self, ConfigError> {
        let api_token = Self::resolve_token(cli, env, toml)?;
        let zone_id = Self::resolve_zone(cli, env, toml)?;
        let selector = Self::resolve_selector(cli, env, toml)?;
        let interval = Self::resolve_interval(cli, env, toml)?;
        let log_file = Self::resolve_log_file(cli, env, toml);

        Ok(Self {
            api_token,
            zone_id,
            selector,
            interval,
            log_file,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from the CLI, the process
    /// environment, and the config file named by `--config` (if any).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let env = EnvConfig::from_env();
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, &env, toml.as_ref())
    }

    fn resolve_token(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<String, ConfigError> {
        cli.token
            .clone()
            .or_else(|| env.api_token.clone())
            .or_else(|| toml.and_then(|t| t.provider.api_token.clone()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::API_TOKEN,
                    "Use --token, set DDNS_SYNC_API_TOKEN, or set provider.api_token in the \
                     config file",
                )
            })
    }

    fn resolve_zone(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<String, ConfigError> {
        cli.zone_id
            .clone()
            .or_else(|| env.zone_id.clone())
            .or_else(|| toml.and_then(|t| t.provider.zone_id.clone()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::ZONE_ID,
                    "Use --zone-id, set DDNS_SYNC_ZONE_ID, or set provider.zone_id in the \
                     config file",
                )
            })
    }

    fn resolve_selector(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<Selector, ConfigError> {
        // Each field merges through the source priority on its own; a
        // comment key from any source beats a domains file from any source.
        let comment_key = cli
            .comment_key
            .clone()
            .or_else(|| env.comment_key.clone())
            .or_else(|| toml.and_then(|t| t.selection.comment_key.clone()));

        if let Some(marker) = comment_key {
            return Ok(Selector::ByComment { marker });
        }

        let domains_file = cli
            .domains_file
            .clone()
            .or_else(|| env.domains_file.clone())
            .or_else(|| toml.and_then(|t| t.selection.domains_file.as_ref().map(PathBuf::from)));

        if let Some(path) = domains_file {
            return Ok(Selector::ByFile {
                path: expand_tilde(&path),
            });
        }

        Err(ConfigError::missing(
            field::SELECTOR,
            "Use --comment-key or --domains-file, their DDNS_SYNC_* equivalents, or the \
             [selection] section in the config file",
        ))
    }

    fn resolve_interval(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        let minutes = if let Some(minutes) = cli.interval {
            minutes
        } else if let Some(raw) = env.interval_minutes.as_deref() {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidInterval {
                    reason: format!("'{raw}' is not a whole number of minutes"),
                })?
        } else {
            toml.and_then(|t| t.schedule.interval_minutes)
                .unwrap_or(defaults::INTERVAL_MINUTES)
        };

        if minutes == 0 {
            return Err(ConfigError::InvalidInterval {
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(minutes.saturating_mul(60)))
    }

    fn resolve_log_file(cli: &Cli, env: &EnvConfig, toml: Option<&TomlConfig>) -> PathBuf {
        let path = cli
            .log_file
            .clone()
            .or_else(|| env.log_file.clone())
            .or_else(|| toml.and_then(|t| t.log.file.as_ref().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from(defaults::LOG_FILE));

        expand_tilde(&path)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Expands a leading `~` or `~/` to the user's home directory.
///
/// Paths without a tilde prefix pass through unchanged, as does `~user`
/// syntax. When no home directory can be determined the path also passes
/// through unchanged.
fn expand_tilde(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };

    if text == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }

    if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    path.to_path_buf()
}
