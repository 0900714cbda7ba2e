// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::dataset::Coordinate;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Raster tile URL with `{s}`, `{z}`, `{x}`, `{y}` and `{r}` placeholders.
    pub tile_url_template: String,
    pub subdomains: String,
    pub attribution: String,
    pub max_zoom: u8,
    pub center: Coordinate,
    pub zoom: f64,
    pub clock_period_secs: u64,
    pub status_period_secs: u64,
    /// Alternative dataset file; the built-in Kamchatka data is used when unset.
    pub dataset_path: Option<PathBuf>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            tile_url_template:
                "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png"
                    .to_string(),
            subdomains: "abcd".to_string(),
            attribution: "© OpenStreetMap © CartoDB".to_string(),
            max_zoom: 19,
            center: Coordinate::new(54.8, 162.0),
            zoom: 7.0,
            clock_period_secs: 60,
            status_period_secs: 30,
            dataset_path: None,
        }
    }
}

impl MapSettings {
    pub fn tile_url(&self, z: u32, x: u32, y: u32) -> String {
        let subdomain = self
            .subdomains
            .chars()
            .nth(((x as usize) + (y as usize)) % self.subdomains.chars().count().max(1))
            .map(String::from)
            .unwrap_or_default();

        self.tile_url_template
            .replace("{s}", &subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{r}", "")
    }

    pub fn clock_period(&self) -> Duration {
        Duration::from_secs(self.clock_period_secs.max(1))
    }

    pub fn status_period(&self) -> Duration {
        Duration::from_secs(self.status_period_secs.max(1))
    }
}

#[derive(Debug, Clone)]
pub struct SettingsManager {
    config_path: PathBuf,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    pub fn new() -> Self {
        Self {
            config_path: crate::get_config_root().join("settings.json"),
        }
    }

    pub fn at(config_path: &Path) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<MapSettings> {
        if !self.config_path.exists() {
            log::debug!("[Settings] No settings at {:?}, using defaults", self.config_path);
            return Ok(MapSettings::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read settings.json")?;

        serde_json::from_str(&content).context("Failed to parse settings.json")
    }

    pub fn save(&self, settings: &MapSettings) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&self.config_path, content).context("Failed to write settings.json")?;
        log::info!("[Settings] Saved to {:?}", self.config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_tile_url_expansion() {
        let settings = MapSettings::default();
        assert_eq!(
            settings.tile_url(7, 120, 41),
            "https://b.basemaps.cartocdn.com/rastertiles/voyager/7/120/41.png"
        );
        assert!(settings.tile_url(7, 0, 0).starts_with("https://a."));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let manager = SettingsManager::at(&dir.path().join("settings.json"));
        assert_eq!(manager.load().unwrap(), MapSettings::default());
    }

    #[test]
    fn test_save_load_and_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let manager = SettingsManager::at(&path);

        let mut settings = MapSettings::default();
        settings.zoom = 9.0;
        settings.dataset_path = Some(PathBuf::from("/tmp/quake.json"));
        manager.save(&settings).unwrap();
        assert_eq!(manager.load().unwrap(), settings);

        fs::write(&path, r#"{ "max_zoom": 12 }"#).unwrap();
        let partial = manager.load().unwrap();
        assert_eq!(partial.max_zoom, 12);
        assert_eq!(partial.clock_period(), Duration::from_secs(60));
    }

    #[test]
    fn test_garbage_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert!(SettingsManager::at(&path).load().is_err());
    }
}
