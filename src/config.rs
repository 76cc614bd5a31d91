use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::audio::features::ChannelMode;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

/// Energy onset detector tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectorConfig {
    /// Analysis window length in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: f64,
    /// Hop as a fraction of the window
    #[serde(default = "default_hop_ratio")]
    pub hop_ratio: f64,
    /// Rolling energy history, in windows
    #[serde(default = "default_history_len")]
    pub history_len: usize,
    /// Stddev multiplier in `mean + sensitivity * stddev`
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Seconds; onsets closer than this to the previous beat are dropped
    #[serde(default = "default_min_beat_gap")]
    pub min_beat_gap: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlignmentConfig {
    /// Seconds; an edit closer than this to a beat counts as on-beat
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AudioConfig {
    #[serde(default)]
    pub channel_mode: ChannelMode,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            hop_ratio: default_hop_ratio(),
            history_len: default_history_len(),
            sensitivity: default_sensitivity(),
            min_beat_gap: default_min_beat_gap(),
        }
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

fn default_window_ms() -> f64 { 50.0 }
fn default_hop_ratio() -> f64 { 0.5 }
fn default_history_len() -> usize { 43 }
fn default_sensitivity() -> f32 { 1.5 }
fn default_min_beat_gap() -> f64 { 0.2 }
fn default_tolerance() -> f64 { 0.2 }

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config: {}", path.display()))
}

/// First existing config file: `./cutsync.toml`, then the per-user locations.
pub fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from("cutsync.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("cutsync").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("cutsync").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}
