//! Simulation settings with persistence
//!
//! The configuration table is saved to `~/.config/fpsim/sim.toml` unless a path is given.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fpsim_core::SimConfig;
use tracing::{info, warn};

/// Get the config directory path
fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fpsim"))
}

/// Default settings file path
pub fn default_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("sim.toml"))
}

/// Load the configuration table, falling back to defaults when missing or unusable
pub fn load(path: Option<&Path>) -> SimConfig {
    let path = match path.map(Path::to_path_buf).or_else(default_path) {
        Some(path) => path,
        None => {
            warn!("Could not determine config directory");
            return SimConfig::default();
        }
    };

    if !path.exists() {
        info!("No settings file found at {:?}, using defaults", path);
        return SimConfig::default();
    }

    match fs::read_to_string(&path) {
        Ok(content) => match parse(&content) {
            Ok(config) => {
                info!("Loaded settings from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load settings: {:#}, using defaults", e);
                SimConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read settings file: {}, using defaults", e);
            SimConfig::default()
        }
    }
}

/// Parse and validate a TOML configuration table
pub fn parse(content: &str) -> anyhow::Result<SimConfig> {
    let config: SimConfig = toml::from_str(content).context("Invalid settings TOML")?;
    config.validate().context("Settings failed validation")?;
    Ok(config)
}

/// Save the configuration table to disk
pub fn save(config: &SimConfig, path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_path) else {
        anyhow::bail!("Could not determine config directory");
    };

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved settings to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&SimConfig::default()).unwrap();
        assert_eq!(parse(&text).unwrap(), SimConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = parse("[movement]\nwalk_speed = 4.0\n").unwrap();
        assert_eq!(config.movement.walk_speed, 4.0);
        assert_eq!(config.movement.crouch_speed, SimConfig::default().movement.crouch_speed);
        assert_eq!(config.recoil, SimConfig::default().recoil);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(parse("[stamina]\nmax = -5.0\n").is_err());
        assert!(parse("[recoil]\npattern = []\n").is_err());
        assert!(parse("movement = 3").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("fpsim-missing-settings-file.toml");
        let _ = fs::remove_file(&path);
        assert_eq!(load(Some(&path)), SimConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("fpsim-settings-{}", std::process::id()))
            .join("sim.toml");
        let mut config = SimConfig::default();
        config.stamina.jump_cost = 12.5;
        save(&config, Some(&path)).unwrap();
        assert_eq!(load(Some(&path)), config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
