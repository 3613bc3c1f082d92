//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.masterhub/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::section::SectionId;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HubConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_topic: Option<String>,
    /// Section keys. Kept as strings so a typo is a warning, not a parse error.
    pub expanded_sections: Option<Vec<String>>,
    pub narrow_width: Option<u16>,
    pub preview_length: Option<usize>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContentConfig {
    pub topics_file: Option<String>,
    pub strict: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NARROW_WIDTH: u16 = 100;
pub const DEFAULT_PREVIEW_LENGTH: usize = 200;
pub const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_EXPANDED: [SectionId; 1] = [SectionId::Admin];

// ============================================================================
// CLI overrides and resolved config
// ============================================================================

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub topics_file: Option<PathBuf>,
    pub default_topic: Option<String>,
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub default_topic: Option<String>,
    pub expanded_sections: Vec<SectionId>,
    pub narrow_width: u16,
    pub preview_length: usize,
    pub log_level: String,
    /// `None` = use the built-in content.
    pub topics_file: Option<PathBuf>,
    pub strict: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.masterhub`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".masterhub"))
}

/// Returns the path to `~/.masterhub/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.masterhub/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HubConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HubConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HubConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HubConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<HubConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: HubConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# masterhub configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_topic = "user-management"      # Or set MASTERHUB_DEFAULT_TOPIC
# expanded_sections = ["admin"]          # admin, development, integration, aura, lwc, architecture
# narrow_width = 100                     # Below this many columns the sidebar collapses
# preview_length = 200                   # Characters shown per search result
# log_level = "info"                     # error, warn, info, debug, trace

# [content]
# topics_file = "topics.json"            # Relative to ~/.masterhub/; or MASTERHUB_TOPICS_FILE
# strict = false                         # Reject content with any problem; or MASTERHUB_STRICT
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HubConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with the environment supplied by `env`.
pub fn resolve_with_env(
    config: &HubConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Default topic: CLI → env → config
    let default_topic = cli
        .default_topic
        .clone()
        .or_else(|| env("MASTERHUB_DEFAULT_TOPIC"))
        .or_else(|| config.general.default_topic.clone());

    // Topics file: CLI → env → config (relative to ~/.masterhub/) → built-in
    let topics_file = cli
        .topics_file
        .clone()
        .or_else(|| env("MASTERHUB_TOPICS_FILE").map(PathBuf::from))
        .or_else(|| {
            config
                .content
                .topics_file
                .as_deref()
                .map(resolve_content_path)
        });

    // Strict: env overrides config either way; the CLI flag can only switch it on
    let env_strict = env("MASTERHUB_STRICT").and_then(|v| {
        let flag = parse_flag(&v);
        if flag.is_none() {
            warn!("Ignoring MASTERHUB_STRICT='{}', expected true or false", v);
        }
        flag
    });
    let strict = cli.strict
        || env_strict
            .or(config.content.strict)
            .unwrap_or(false);

    ResolvedConfig {
        default_topic,
        expanded_sections: resolve_expanded(config),
        narrow_width: config
            .general
            .narrow_width
            .unwrap_or(DEFAULT_NARROW_WIDTH),
        preview_length: config
            .general
            .preview_length
            .unwrap_or(DEFAULT_PREVIEW_LENGTH),
        log_level: config
            .general
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        topics_file,
        strict,
    }
}

/// Section keys from config, dropping (and logging) unknown ones.
fn resolve_expanded(config: &HubConfig) -> Vec<SectionId> {
    let Some(keys) = &config.general.expanded_sections else {
        return DEFAULT_EXPANDED.to_vec();
    };
    keys.iter()
        .filter_map(|key| {
            let section = SectionId::from_key(key);
            if section.is_none() {
                warn!("Ignoring unknown section '{}' in expanded_sections", key);
            }
            section
        })
        .collect()
}

/// Absolute paths pass through; relative ones live under `~/.masterhub/`.
fn resolve_content_path(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = HubConfig::default();
        assert!(config.general.default_topic.is_none());
        assert!(config.content.topics_file.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&HubConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.narrow_width, DEFAULT_NARROW_WIDTH);
        assert_eq!(resolved.preview_length, DEFAULT_PREVIEW_LENGTH);
        assert_eq!(resolved.expanded_sections, vec![SectionId::Admin]);
        assert_eq!(resolved.log_level, "info");
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = HubConfig {
            general: GeneralConfig {
                default_topic: Some("rest-api".to_string()),
                expanded_sections: Some(vec!["integration".to_string(), "lwc".to_string()]),
                narrow_width: Some(80),
                preview_length: Some(120),
                log_level: Some("debug".to_string()),
            },
            content: ContentConfig {
                topics_file: Some("/srv/docs/topics.json".to_string()),
                strict: Some(true),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.default_topic.as_deref(), Some("rest-api"));
        assert_eq!(
            resolved.expanded_sections,
            vec![SectionId::Integration, SectionId::Lwc]
        );
        assert_eq!(resolved.narrow_width, 80);
        assert_eq!(resolved.preview_length, 120);
        assert_eq!(resolved.log_level, "debug");
        assert_eq!(
            resolved.topics_file,
            Some(PathBuf::from("/srv/docs/topics.json"))
        );
        assert!(resolved.strict);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = HubConfig {
            general: GeneralConfig {
                default_topic: Some("rest-api".to_string()),
                ..Default::default()
            },
            content: ContentConfig {
                topics_file: Some("/srv/docs/topics.json".to_string()),
                strict: None,
            },
        };
        let cli = CliOverrides {
            topics_file: Some(PathBuf::from("local.json")),
            default_topic: Some("soql-sosl".to_string()),
            strict: true,
        };
        let resolved = resolve_with_env(&config, &cli, no_env);
        assert_eq!(resolved.default_topic.as_deref(), Some("soql-sosl"));
        assert_eq!(resolved.topics_file, Some(PathBuf::from("local.json")));
        assert!(resolved.strict);
    }

    #[test]
    fn test_unknown_expanded_sections_are_dropped() {
        let config = HubConfig {
            general: GeneralConfig {
                expanded_sections: Some(vec!["admin".to_string(), "marketing".to_string()]),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.expanded_sections, vec![SectionId::Admin]);
    }

    #[test]
    fn test_explicit_empty_expanded_sections_is_respected() {
        let config = HubConfig {
            general: GeneralConfig {
                expanded_sections: Some(Vec::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert!(resolved.expanded_sections.is_empty());
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[general]
default_topic = "apex-fundamentals"
expanded_sections = ["development", "aura"]
narrow_width = 90
preview_length = 150
log_level = "warn"

[content]
topics_file = "custom.json"
strict = true
"#;
        let config: HubConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.default_topic.as_deref(),
            Some("apex-fundamentals")
        );
        assert_eq!(config.general.expanded_sections.as_ref().map(Vec::len), Some(2));
        assert_eq!(config.general.narrow_width, Some(90));
        assert_eq!(config.content.topics_file.as_deref(), Some("custom.json"));
        assert_eq!(config.content.strict, Some(true));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[general]
preview_length = 80
"#;
        let config: HubConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.preview_length, Some(80));
        assert!(config.general.default_topic.is_none());
        assert!(config.content.strict.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("masterhub-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\nnarrow_width = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_relative_content_path_lives_under_config_dir() {
        if let Some(dir) = config_dir() {
            assert_eq!(resolve_content_path("topics.json"), dir.join("topics.json"));
        }
        assert_eq!(
            resolve_content_path("/abs/topics.json"),
            PathBuf::from("/abs/topics.json")
        );
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" yes "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    fn strict_config(strict: Option<bool>) -> HubConfig {
        HubConfig {
            content: ContentConfig {
                topics_file: None,
                strict,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_env_strict_off_overrides_config() {
        let env = env_of(&[("MASTERHUB_STRICT", "0")]);
        let resolved = resolve_with_env(&strict_config(Some(true)), &CliOverrides::default(), env);
        assert!(!resolved.strict);
    }

    #[test]
    fn test_env_strict_on_overrides_config() {
        let env = env_of(&[("MASTERHUB_STRICT", "true")]);
        let resolved = resolve_with_env(&strict_config(Some(false)), &CliOverrides::default(), env);
        assert!(resolved.strict);
    }

    #[test]
    fn test_unparseable_env_strict_falls_back_to_config() {
        let env = env_of(&[("MASTERHUB_STRICT", "maybe")]);
        let resolved = resolve_with_env(&strict_config(Some(true)), &CliOverrides::default(), env);
        assert!(resolved.strict);
    }

    #[test]
    fn test_cli_strict_beats_env_off() {
        let env = env_of(&[("MASTERHUB_STRICT", "off")]);
        let cli = CliOverrides {
            strict: true,
            ..Default::default()
        };
        assert!(resolve_with_env(&strict_config(None), &cli, env).strict);
    }

    #[test]
    fn test_env_default_topic_sits_between_config_and_cli() {
        let config = HubConfig {
            general: GeneralConfig {
                default_topic: Some("rest-api".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_of(&[("MASTERHUB_DEFAULT_TOPIC", "apex-triggers")]);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), &env);
        assert_eq!(resolved.default_topic.as_deref(), Some("apex-triggers"));

        let cli = CliOverrides {
            default_topic: Some("soql-sosl".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, &env);
        assert_eq!(resolved.default_topic.as_deref(), Some("soql-sosl"));
    }

    #[test]
    fn test_env_topics_file_is_used_verbatim() {
        let config = HubConfig {
            content: ContentConfig {
                topics_file: Some("/srv/docs/topics.json".to_string()),
                strict: None,
            },
            ..Default::default()
        };
        let env = env_of(&[("MASTERHUB_TOPICS_FILE", "notes/topics.json")]);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.topics_file, Some(PathBuf::from("notes/topics.json")));
    }
}
