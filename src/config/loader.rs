//! Configuration file loading with precedence handling.

use crate::view_state::layout_params::{LayoutConfig, DEFAULT_TEST_STRING};
use crate::view_state::types::{ViewportDimensions, Zoom};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "SEQCANVAS_CONFIG";
/// Environment variable overriding positions per line.
pub const ENV_ZOOM: &str = "SEQCANVAS_ZOOM";
/// Environment variable overriding the viewport width.
pub const ENV_WIDTH: &str = "SEQCANVAS_WIDTH";

/// Default viewport width in canvas units.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 80;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or out-of-range values.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An override environment variable holds an unusable value.
    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Value found.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/seqcanvas/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Positions per line; must be at least 1.
    #[serde(default)]
    pub zoom: Option<Zoom>,

    /// Viewport width in canvas units.
    #[serde(default)]
    pub viewport_width: Option<u32>,

    /// Space above the first line.
    #[serde(default)]
    pub top_margin: Option<u32>,

    /// Space below the last line.
    #[serde(default)]
    pub bottom_margin: Option<u32>,

    /// Space left of every line.
    #[serde(default)]
    pub left_margin: Option<u32>,

    /// Space right of every line.
    #[serde(default)]
    pub right_margin: Option<u32>,

    /// Height of the stand-in for a line that failed to render.
    #[serde(default)]
    pub placeholder_height: Option<u32>,

    /// Text measured to derive character width.
    #[serde(default)]
    pub test_string: Option<String>,

    /// Draw the position ruler.
    #[serde(default)]
    pub show_ruler: Option<bool>,

    /// Draw the complement strand.
    #[serde(default)]
    pub show_complement: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Positions per line.
    pub zoom: Zoom,
    /// Viewport width.
    pub viewport_width: u32,
    /// Space above the first line.
    pub top_margin: u32,
    /// Space below the last line.
    pub bottom_margin: u32,
    /// Space left of every line.
    pub left_margin: u32,
    /// Space right of every line.
    pub right_margin: u32,
    /// Placeholder height.
    pub placeholder_height: u32,
    /// Measurement test string.
    pub test_string: String,
    /// Draw the position ruler.
    pub show_ruler: bool,
    /// Draw the complement strand.
    pub show_complement: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            zoom: Zoom::default(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            top_margin: 0,
            bottom_margin: 0,
            left_margin: 0,
            right_margin: 0,
            placeholder_height: 1,
            test_string: DEFAULT_TEST_STRING.to_string(),
            show_ruler: true,
            show_complement: true,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Layout settings for the engine.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            top_margin: self.top_margin,
            bottom_margin: self.bottom_margin,
            left_margin: self.left_margin,
            right_margin: self.right_margin,
            zoom: self.zoom,
            placeholder_height: self.placeholder_height,
            test_string: self.test_string.clone(),
        }
    }

    /// Viewport for the engine. Height is unused by text output.
    pub fn viewport(&self) -> ViewportDimensions {
        ViewportDimensions::new(self.viewport_width, 0)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/seqcanvas/seqcanvas.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("seqcanvas").join("seqcanvas.log"),
        None => PathBuf::from("seqcanvas.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/seqcanvas/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("seqcanvas").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SEQCANVAS_CONFIG` environment variable
/// 3. Default path `~/.config/seqcanvas/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed, or if
/// `SEQCANVAS_CONFIG` is not valid UTF-8.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(ENV_CONFIG) {
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()));
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

fn env_number<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    let Ok(value) = std::env::var(name) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidEnv {
            name,
            value: value.clone(),
            reason: e.to_string(),
        })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SEQCANVAS_ZOOM`: positions per line (>= 1)
/// - `SEQCANVAS_WIDTH`: viewport width
///
/// # Errors
///
/// [`ConfigError::InvalidEnv`] if a variable is set but not a valid number.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(zoom) = env_number::<usize>(ENV_ZOOM)? {
        config.zoom = Zoom::new(zoom).map_err(|e| ConfigError::InvalidEnv {
            name: ENV_ZOOM,
            value: zoom.to_string(),
            reason: e.to_string(),
        })?;
    }

    if let Some(width) = env_number::<u32>(ENV_WIDTH)? {
        config.viewport_width = width;
    }

    Ok(config)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        zoom: config.zoom.unwrap_or(defaults.zoom),
        viewport_width: config.viewport_width.unwrap_or(defaults.viewport_width),
        top_margin: config.top_margin.unwrap_or(defaults.top_margin),
        bottom_margin: config.bottom_margin.unwrap_or(defaults.bottom_margin),
        left_margin: config.left_margin.unwrap_or(defaults.left_margin),
        right_margin: config.right_margin.unwrap_or(defaults.right_margin),
        placeholder_height: config
            .placeholder_height
            .unwrap_or(defaults.placeholder_height),
        test_string: config.test_string.unwrap_or(defaults.test_string),
        show_ruler: config.show_ruler.unwrap_or(defaults.show_ruler),
        show_complement: config.show_complement.unwrap_or(defaults.show_complement),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    zoom_override: Option<Zoom>,
    width_override: Option<u32>,
) -> ResolvedConfig {
    if let Some(zoom) = zoom_override {
        config.zoom = zoom;
    }

    if let Some(width) = width_override {
        config.viewport_width = width;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
