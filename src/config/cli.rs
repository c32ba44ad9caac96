//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ddns-sync: keep DNS records pointed at this host's public IP
///
/// Periodically discovers the host's public IP address and rewrites the
/// content of selected DNS records whenever they have drifted.
#[derive(Debug, Parser)]
#[command(name = "ddns-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Provider API token with DNS edit permission
    #[arg(long)]
    pub token: Option<String>,

    /// Identifier of the DNS zone the records live in
    #[arg(long = "zone-id", value_name = "ID")]
    pub zone_id: Option<String>,

    /// Reconcile every record in the zone whose comment contains this marker
    #[arg(long = "comment-key", value_name = "MARKER")]
    pub comment_key: Option<String>,

    /// Path to a JSON manifest listing the domains to reconcile
    #[arg(long = "domains-file", value_name = "PATH")]
    pub domains_file: Option<PathBuf>,

    /// Minutes between reconciliation passes
    #[arg(long, value_name = "MINUTES")]
    pub interval: Option<u64>,

    /// File that warnings and errors are appended to
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Log intended updates without performing them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ddns-sync
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ddns-sync.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
