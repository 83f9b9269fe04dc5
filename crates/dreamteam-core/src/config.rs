// Configuration loading and parsing (dreamteam.toml).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::season::{season_windows, SeasonCode};

pub const DEFAULT_BASE_URL: &str = "https://statsapi.web.nhl.com/api/v1";
pub const DEFAULT_OLDEST_SEASON: u16 = 1987;
pub const DEFAULT_NEWEST_SEASON: u16 = 2020;

const CONFIG_FILE: &str = "dreamteam.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub seasons: SeasonRange,
    /// Where the config was read from; `None` when built-in defaults are used.
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Stats API root without a trailing slash.
    pub base_url: String,
}

/// Closed range of season years; windows are consecutive-year pairs inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonRange {
    pub oldest: u16,
    pub newest: u16,
}

impl SeasonRange {
    pub fn windows(&self) -> Vec<SeasonCode> {
        season_windows(self.oldest, self.newest)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            seasons: SeasonRange {
                oldest: DEFAULT_OLDEST_SEASON,
                newest: DEFAULT_NEWEST_SEASON,
            },
            source: None,
        }
    }
}

// ---------------------------------------------------------------------------
// dreamteam.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    seasons: SeasonsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiSection {
    base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeasonsSection {
    oldest: Option<u16>,
    newest: Option<u16>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate config text. Missing fields take their defaults.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let defaults = Config::default();
    let base_url = file
        .api
        .base_url
        .map(|u| u.trim().trim_end_matches('/').to_string())
        .unwrap_or(defaults.api.base_url);

    let config = Config {
        api: ApiConfig { base_url },
        seasons: SeasonRange {
            oldest: file.seasons.oldest.unwrap_or(defaults.seasons.oldest),
            newest: file.seasons.newest.unwrap_or(defaults.seasons.newest),
        },
        source: Some(path.to_path_buf()),
    };

    validate(&config)?;
    Ok(config)
}

/// Load `config/dreamteam.toml` relative to `base_dir`. `None` if that file
/// does not exist.
pub fn load_config_from(base_dir: &Path) -> Result<Option<Config>, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    load_file(&path)
}

/// Resolve configuration: `./config/dreamteam.toml`, then the platform config
/// directory, then built-in defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;

    let platform_dir = project_dirs().map(|dirs| dirs.config_dir().to_path_buf());
    load_config_in(&cwd, platform_dir.as_deref())
}

/// The lookup behind `load_config`, with both directories supplied.
pub fn load_config_in(
    base_dir: &Path,
    platform_dir: Option<&Path>,
) -> Result<Config, ConfigError> {
    if let Some(config) = load_config_from(base_dir)? {
        return Ok(config);
    }

    if let Some(dir) = platform_dir {
        if let Some(config) = load_file(&dir.join(CONFIG_FILE))? {
            return Ok(config);
        }
    }

    info!("No config file found, using built-in defaults");
    Ok(Config::default())
}

/// Platform directories for this application (config, logs).
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "dreamteam")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_file(path: &Path) -> Result<Option<Config>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    info!("Loading config from {}", path.display());
    parse_config(&text, path).map(Some)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = &config.api.base_url;
    if url.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must start with http:// or https://, got {url}"),
        });
    }

    let seasons = config.seasons;
    if seasons.oldest >= seasons.newest {
        return Err(ConfigError::ValidationError {
            field: "seasons.oldest".into(),
            message: format!(
                "must be before seasons.newest ({} >= {})",
                seasons.oldest, seasons.newest
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
