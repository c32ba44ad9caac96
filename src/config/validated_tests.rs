//! Tests for configuration merging and validation.

use std::path::PathBuf;
use std::time::Duration;

use super::cli::Cli;
use super::env::EnvConfig;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};
use crate::domains::Selector;

fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["ddns-sync"];
    full.extend_from_slice(args);
    Cli::parse_from_iter(full)
}

/// Merges the three sources; the TOML source is given as a string.
fn resolve(
    args: &[&str],
    env: &EnvConfig,
    toml: Option<&str>,
) -> Result<ValidatedConfig, ConfigError> {
    let parsed = toml.map(|content| TomlConfig::parse(content).unwrap());
    ValidatedConfig::from_raw(&cli(args), env, parsed.as_ref())
}

fn no_env() -> EnvConfig {
    EnvConfig::default()
}

/// CLI arguments satisfying every required field.
const BASE_ARGS: &[&str] = &[
    "--token",
    "cli-token",
    "--zone-id",
    "cli-zone",
    "--comment-key",
    "cli-marker",
];

mod required_fields {
    use super::*;

    #[test]
    fn missing_token_is_rejected() {
        let result = resolve(&["--zone-id", "z1", "--comment-key", "k"], &no_env(), None);

        match result {
            Err(ConfigError::MissingRequired { field: name, hint }) => {
                assert_eq!(name, field::API_TOKEN);
                assert!(hint.contains("--token"));
                assert!(hint.contains("DDNS_SYNC_API_TOKEN"));
            }
            other => panic!("expected MissingRequired, got {other:?}"),
        }
    }

    #[test]
    fn missing_zone_is_rejected() {
        let result = resolve(&["--token", "tok", "--comment-key", "k"], &no_env(), None);

        match result {
            Err(ConfigError::MissingRequired { field: name, .. }) => {
                assert_eq!(name, field::ZONE_ID);
            }
            other => panic!("expected MissingRequired, got {other:?}"),
        }
    }

    #[test]
    fn missing_selection_source_is_rejected() {
        let result = resolve(&["--token", "tok", "--zone-id", "z1"], &no_env(), None);

        match result {
            Err(ConfigError::MissingRequired { field: name, hint }) => {
                assert_eq!(name, field::SELECTOR);
                assert!(hint.contains("--comment-key"));
                assert!(hint.contains("--domains-file"));
            }
            other => panic!("expected MissingRequired, got {other:?}"),
        }
    }

    #[test]
    fn full_toml_alone_is_enough() {
        let toml = r#"
            [provider]
            api_token = "toml-token"
            zone_id = "toml-zone"

            [selection]
            comment_key = "toml-marker"
        "#;

        let config = resolve(&[], &no_env(), Some(toml)).unwrap();

        assert_eq!(config.api_token, "toml-token");
        assert_eq!(config.zone_id, "toml-zone");
        assert_eq!(
            config.selector,
            Selector::ByComment {
                marker: "toml-marker".to_string()
            }
        );
        assert!(!config.dry_run);
    }
}

mod precedence {
    use super::*;

    #[test]
    fn cli_beats_env_beats_toml_for_the_token() {
        let env = EnvConfig {
            api_token: Some("env-token".to_string()),
            ..no_env()
        };
        let toml = r#"
            [provider]
            api_token = "toml-token"
        "#;

        let config = resolve(BASE_ARGS, &env, Some(toml)).unwrap();
        assert_eq!(config.api_token, "cli-token");

        let config = resolve(
            &["--zone-id", "z1", "--comment-key", "k"],
            &env,
            Some(toml),
        )
        .unwrap();
        assert_eq!(config.api_token, "env-token");

        let config = resolve(
            &["--zone-id", "z1", "--comment-key", "k"],
            &no_env(),
            Some(toml),
        )
        .unwrap();
        assert_eq!(config.api_token, "toml-token");
    }

    #[test]
    fn env_zone_fills_a_cli_gap() {
        let env = EnvConfig {
            zone_id: Some("env-zone".to_string()),
            ..no_env()
        };

        let config = resolve(&["--token", "tok", "--comment-key", "k"], &env, None).unwrap();

        assert_eq!(config.zone_id, "env-zone");
    }

    #[test]
    fn cli_interval_beats_env_interval() {
        let env = EnvConfig {
            interval_minutes: Some("120".to_string()),
            ..no_env()
        };
        let mut args = BASE_ARGS.to_vec();
        args.extend_from_slice(&["--interval", "15"]);

        let config = resolve(&args, &env, None).unwrap();

        assert_eq!(config.interval, Duration::from_secs(15 * 60));
    }

    #[test]
    fn env_log_file_beats_toml_log_file() {
        let env = EnvConfig {
            log_file: Some(PathBuf::from("/env/ddns.log")),
            ..no_env()
        };
        let toml = r#"
            [log]
            file = "/toml/ddns.log"
        "#;

        let config = resolve(BASE_ARGS, &env, Some(toml)).unwrap();

        assert_eq!(config.log_file, PathBuf::from("/env/ddns.log"));
    }

    #[test]
    fn defaults_apply_when_no_source_sets_a_value() {
        let config = resolve(BASE_ARGS, &no_env(), None).unwrap();

        assert_eq!(config.interval, Duration::from_secs(60 * 60));
        assert_eq!(config.log_file, PathBuf::from("ddns-sync.log"));
    }
}

mod selection {
    use super::*;

    #[test]
    fn comment_key_beats_domains_file_in_the_same_source() {
        let toml = r#"
            [selection]
            comment_key = "marker"
            domains_file = "/etc/domains.json"
        "#;

        let config = resolve(&["--token", "t", "--zone-id", "z"], &no_env(), Some(toml)).unwrap();

        assert_eq!(
            config.selector,
            Selector::ByComment {
                marker: "marker".to_string()
            }
        );
    }

    #[test]
    fn toml_comment_key_beats_cli_domains_file() {
        // Mode precedence is decided after merging, so a comment key from a
        // weaker source still wins over a domains file from a stronger one.
        let toml = r#"
            [selection]
            comment_key = "toml-marker"
        "#;
        let args = &[
            "--token",
            "t",
            "--zone-id",
            "z",
            "--domains-file",
            "/etc/domains.json",
        ];

        let config = resolve(args, &no_env(), Some(toml)).unwrap();

        assert_eq!(
            config.selector,
            Selector::ByComment {
                marker: "toml-marker".to_string()
            }
        );
    }

    #[test]
    fn cli_comment_key_beats_env_comment_key() {
        let env = EnvConfig {
            comment_key: Some("env-marker".to_string()),
            ..no_env()
        };

        let config = resolve(BASE_ARGS, &env, None).unwrap();

        assert_eq!(
            config.selector,
            Selector::ByComment {
                marker: "cli-marker".to_string()
            }
        );
    }

    #[test]
    fn domains_file_alone_selects_by_file() {
        let args = &[
            "--token",
            "t",
            "--zone-id",
            "z",
            "--domains-file",
            "/etc/ddns-sync/domains.json",
        ];

        let config = resolve(args, &no_env(), None).unwrap();

        assert_eq!(
            config.selector,
            Selector::ByFile {
                path: PathBuf::from("/etc/ddns-sync/domains.json")
            }
        );
    }

    #[test]
    fn env_domains_file_is_used_when_cli_has_none() {
        let env = EnvConfig {
            domains_file: Some(PathBuf::from("/env/domains.json")),
            ..no_env()
        };

        let config = resolve(&["--token", "t", "--zone-id", "z"], &env, None).unwrap();

        assert_eq!(
            config.selector,
            Selector::ByFile {
                path: PathBuf::from("/env/domains.json")
            }
        );
    }
}

mod intervals {
    use super::*;

    #[test]
    fn minutes_convert_to_seconds() {
        let mut args = BASE_ARGS.to_vec();
        args.extend_from_slice(&["--interval", "30"]);

        let config = resolve(&args, &no_env(), None).unwrap();

        assert_eq!(config.interval, Duration::from_secs(30 * 60));
    }

    #[test]
    fn zero_cli_interval_is_rejected() {
        let mut args = BASE_ARGS.to_vec();
        args.extend_from_slice(&["--interval", "0"]);

        let result = resolve(&args, &no_env(), None);

        assert!(matches!(result, Err(ConfigError::InvalidInterval { .. })));
    }

    #[test]
    fn zero_toml_interval_is_rejected() {
        let toml = r"
            [schedule]
            interval_minutes = 0
        ";

        let result = resolve(BASE_ARGS, &no_env(), Some(toml));

        assert!(matches!(result, Err(ConfigError::InvalidInterval { .. })));
    }

    #[test]
    fn env_interval_is_parsed() {
        let env = EnvConfig {
            interval_minutes: Some("15".to_string()),
            ..no_env()
        };

        let config = resolve(BASE_ARGS, &env, None).unwrap();

        assert_eq!(config.interval, Duration::from_secs(15 * 60));
    }

    #[test]
    fn unparseable_env_interval_is_rejected() {
        let env = EnvConfig {
            interval_minutes: Some("soon".to_string()),
            ..no_env()
        };

        match resolve(BASE_ARGS, &env, None) {
            Err(ConfigError::InvalidInterval { reason }) => {
                assert!(reason.contains("soon"));
            }
            other => panic!("expected InvalidInterval, got {other:?}"),
        }
    }
}

mod paths {
    use super::*;

    #[test]
    fn tilde_domains_file_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let args = &[
            "--token",
            "t",
            "--zone-id",
            "z",
            "--domains-file",
            "~/.config/ddns-sync/domains.json",
        ];

        let config = resolve(args, &no_env(), None).unwrap();

        assert_eq!(
            config.selector,
            Selector::ByFile {
                path: home.join(".config/ddns-sync/domains.json")
            }
        );
    }

    #[test]
    fn tilde_log_file_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let mut args = BASE_ARGS.to_vec();
        args.extend_from_slice(&["--log-file", "~/ddns-sync.log"]);

        let config = resolve(&args, &no_env(), None).unwrap();

        assert_eq!(config.log_file, home.join("ddns-sync.log"));
    }

    #[test]
    fn absolute_paths_pass_through() {
        let mut args = BASE_ARGS.to_vec();
        args.extend_from_slice(&["--log-file", "/var/log/ddns-sync.log"]);

        let config = resolve(&args, &no_env(), None).unwrap();

        assert_eq!(config.log_file, PathBuf::from("/var/log/ddns-sync.log"));
    }
}

mod redaction {
    use super::*;

    #[test]
    fn debug_redacts_the_token() {
        let config = resolve(BASE_ARGS, &no_env(), None).unwrap();

        let debug = format!("{config:?}");

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("cli-token"));
    }

    #[test]
    fn display_omits_the_token() {
        let config = resolve(BASE_ARGS, &no_env(), None).unwrap();

        let display = config.to_string();

        assert!(!display.contains("cli-token"));
        assert!(display.contains("zone: cli-zone"));
        assert!(display.contains("interval: 60m"));
    }
}

mod init {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn written_template_parses_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ddns-sync.toml");

        write_default_config(&path).unwrap();

        let config = TomlConfig::load(&path).unwrap();
        assert!(config.provider.api_token.is_none());
        assert_eq!(config.schedule.interval_minutes, Some(60));
    }

    #[test]
    fn unwritable_path_returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-subdir").join("ddns-sync.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
