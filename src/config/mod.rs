//! Configuration module.
//!
//! Settings come from defaults, an optional TOML file, `SEQCANVAS_*` environment
//! variables and command-line flags, in increasing order of precedence.

pub mod loader;

pub use loader::{
    ConfigError, ConfigFile, ResolvedConfig, apply_cli_overrides, apply_env_overrides,
    default_config_path, default_log_path, load_config_file, load_config_with_precedence,
    merge_config,
};
