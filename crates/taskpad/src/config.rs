/*
[INPUT]:  Optional YAML configuration file
[OUTPUT]: Parsed application configuration with defaults
[POS]:    Configuration layer - UI tuning and tag vocabulary
[UPDATE]: When adding new configuration options
*/

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration. Every field has a default so the file is
/// optional and may be partial.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// UI tick interval in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// How many days ahead the due-date picker offers.
    #[serde(default = "default_horizon_days")]
    pub picker_horizon_days: u16,
    /// Tags offered in the picker. Free-text tags are always accepted too.
    #[serde(default = "default_preset_tags")]
    pub preset_tags: Vec<String>,
    /// How many ticks the success notice stays on screen.
    #[serde(default = "default_notice_ticks")]
    pub notice_ticks: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            picker_horizon_days: default_horizon_days(),
            preset_tags: default_preset_tags(),
            notice_ticks: default_notice_ticks(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).context("parse config file")?;
        Ok(config)
    }
}

fn default_tick_ms() -> u64 {
    250
}

fn default_horizon_days() -> u16 {
    14
}

fn default_preset_tags() -> Vec<String> {
    vec![
        "Crucial".to_string(),
        "High Priority".to_string(),
        "Low Priority".to_string(),
        "Usual".to_string(),
    ]
}

fn default_notice_ticks() -> u8 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: AppConfig = serde_yaml::from_str("tick_ms: 100\n").unwrap();
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.picker_horizon_days, 14);
        assert_eq!(config.notice_ticks, 12);
        assert_eq!(
            config.preset_tags,
            vec!["Crucial", "High Priority", "Low Priority", "Usual"]
        );
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.tick_ms, AppConfig::default().tick_ms);
    }
}
