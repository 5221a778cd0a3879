//! Configuration types for kvsearch.
//!
//! [`Config::load`] layers `~/.config/kvsearch/config.toml` (or an explicit
//! file) and `KVSEARCH_*` environment variables over the embedded defaults.
//! [`Config::defaults`] returns the defaults without touching the filesystem
//! or the environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
# max_depth    = 32
# max_listings = 10000

[log]
filter = "warn"
"#;

const ENV_PREFIX: &str = "KVSEARCH";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// `[search]` section. Both limits are unbounded when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Deepest folder level the engine may descend into. Top-level folders
    /// are level 1.
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Most listing calls one search may issue, the root listing included.
    #[serde(default)]
    pub max_listings: Option<usize>,
}

/// `[log]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "warn".to_string() }

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/kvsearch/config.toml` (if present) and the
    /// environment, layered on top of the built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path(), false)
    }

    /// Load from an explicit file, which must exist, plus the environment.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        Self::load_from(path, true)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("kvsearch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
