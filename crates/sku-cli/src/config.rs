//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory under which projects get their own folder.
    pub projects_dir: PathBuf,

    /// Keep the SKU log open for a whole session instead of per entry.
    pub persistent_log: bool,

    /// Default clock offset in seconds for `rename`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_seconds: Option<f64>,

    /// Refresh period of the `offset-capture` clock.
    pub clock_refresh_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from("."),
            persistent_log: false,
            offset_seconds: None,
            clock_refresh_ms: 40,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SKU_*)
        figment = figment.merge(Env::prefixed("SKU_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for sku.
///
/// On Linux: `~/.config/sku-namer`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sku-namer"))
}
