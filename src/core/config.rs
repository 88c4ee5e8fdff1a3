//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.formula-cli/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::source::formula1::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FormulaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub art: ArtConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub debug: Option<bool>,
    pub text_width: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub news_image_size: Option<u8>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ArtConfig {
    pub colored: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TEXT_WIDTH: usize = 80;
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_NEWS_IMAGE_SIZE: u8 = 3;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub fetch_timeout: Duration,
    pub text_width: usize,
    pub news_image_size: u8,
    pub colored_art: bool,
    /// Queue a debug message naming the screen on every render.
    pub debug: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&FormulaConfig::default())
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.formula-cli/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".formula-cli").join("config.toml"))
}

/// Load config from `~/.formula-cli/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FormulaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FormulaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FormulaConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<FormulaConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(FormulaConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FormulaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# formula-cli Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [general]
# debug = false                      # show the screen name as a debug message
# text_width = 80                    # wrap column for biographies

# [source]
# base_url = "https://www.formula1.com"   # Or set FORMULA_CLI_BASE_URL
# timeout_secs = 20                  # Or set FORMULA_CLI_TIMEOUT
# news_image_size = 3                # column size of news images (1-4)

# [art]
# colored = false                    # colored palette instead of grey tones
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &FormulaConfig) -> ResolvedConfig {
    // Base URL: env → config → default
    let base_url = std::env::var("FORMULA_CLI_BASE_URL")
        .ok()
        .or_else(|| config.source.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → default; unparsable env values are ignored
    let timeout_secs = std::env::var("FORMULA_CLI_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(config.source.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    ResolvedConfig {
        base_url,
        fetch_timeout: Duration::from_secs(timeout_secs.max(1)),
        text_width: config
            .general
            .text_width
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_TEXT_WIDTH),
        news_image_size: config
            .source
            .news_image_size
            .unwrap_or(DEFAULT_NEWS_IMAGE_SIZE),
        colored_art: config.art.colored.unwrap_or(false),
        debug: config.general.debug.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&FormulaConfig::default());
        assert_eq!(resolved.text_width, DEFAULT_TEXT_WIDTH);
        assert_eq!(resolved.news_image_size, DEFAULT_NEWS_IMAGE_SIZE);
        assert!(!resolved.colored_art);
        assert!(!resolved.debug);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = FormulaConfig {
            general: GeneralConfig {
                debug: Some(true),
                text_width: Some(60),
            },
            source: SourceConfig {
                news_image_size: Some(2),
                ..Default::default()
            },
            art: ArtConfig { colored: Some(true) },
        };
        let resolved = resolve(&config);
        assert_eq!(resolved.text_width, 60);
        assert_eq!(resolved.news_image_size, 2);
        assert!(resolved.colored_art);
        assert!(resolved.debug);
    }

    #[test]
    fn test_zero_text_width_falls_back() {
        let config = FormulaConfig {
            general: GeneralConfig {
                text_width: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve(&config).text_width, DEFAULT_TEXT_WIDTH);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[source]
timeout_secs = 5
"#;
        let config: FormulaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source.timeout_secs, Some(5));
        assert!(config.source.base_url.is_none());
        assert!(config.general.debug.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: FormulaConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(config.general.text_width.is_none());
    }

    #[test]
    fn test_load_config_generates_missing_file() {
        let dir = std::env::temp_dir().join(format!("formula-cli-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.source.base_url.is_none());
        assert!(path.exists());

        fs::write(&path, "[general]\ntext_width = 42\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.text_width, Some(42));

        fs::write(&path, "[general\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
