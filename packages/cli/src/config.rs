use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;
use twinpane_editor::{ExportOptions, ImportLimits, SyncConfig, DEFAULT_SYNC_DELAY};

pub const DEFAULT_CONFIG_NAME: &str = "twinpane.config.json";

/// Twinpane configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Quiet period before an edit is mirrored into the other editor
    #[serde(default = "default_sync_delay_ms")]
    pub sync_delay_ms: u64,

    /// What the current tier may import and export
    #[serde(default)]
    pub limits: ImportLimits,

    /// Defaults for `twinpane export`; command-line flags only turn options on
    #[serde(default)]
    pub export: ExportOptions,
}

fn default_sync_delay_ms() -> u64 {
    DEFAULT_SYNC_DELAY.as_millis() as u64
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            debug!("loaded {}", config_path.display());
            Ok(config)
        } else {
            debug!("no {} in {}, using defaults", DEFAULT_CONFIG_NAME, cwd);
            Ok(Config::default())
        }
    }

    pub fn sync(&self) -> SyncConfig {
        SyncConfig::from_millis(self.sync_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_delay_ms: default_sync_delay_ms(),
            limits: ImportLimits::default(),
            export: ExportOptions::default(),
        }
    }
}
