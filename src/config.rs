//! Configuration loader/writer for the action bar filters.
//!
//! Settings live in `config.toml` inside the data directory (`~/.actionbar`,
//! or `$ACTIONBAR_DIR` when set). A missing file means every filter is off.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub action_bar_filters: ActionBarFilters,
}

/// "Hide X" toggles applied when rewriting the action bar.
///
/// Every flag hides its segment kind when `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBarFilters {
    #[serde(default)]
    pub hide_health: bool,
    #[serde(default)]
    pub hide_defense: bool,
    #[serde(default)]
    pub hide_mana: bool,
    /// Persisted for the settings screen; the rewriter has no ability-cost filter yet
    #[serde(default)]
    pub hide_ability_use: bool,
    #[serde(default)]
    pub hide_skill: bool,
    #[serde(default)]
    pub hide_drill: bool,
    #[serde(default)]
    pub hide_secrets: bool,
    #[serde(default)]
    pub hide_tickers: bool,
    #[serde(default)]
    pub hide_rift_time: bool,
    #[serde(default)]
    pub hide_location: bool,
    #[serde(default)]
    pub hide_pressure: bool,
}

/// Filter names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FilterKind {
    Health,
    Defense,
    Mana,
    AbilityUse,
    Skill,
    Drill,
    Secrets,
    Tickers,
    RiftTime,
    Location,
    Pressure,
}

impl ActionBarFilters {
    /// Turn on the filter for `kind`
    pub fn hide(&mut self, kind: FilterKind) {
        let flag = match kind {
            FilterKind::Health => &mut self.hide_health,
            FilterKind::Defense => &mut self.hide_defense,
            FilterKind::Mana => &mut self.hide_mana,
            FilterKind::AbilityUse => &mut self.hide_ability_use,
            FilterKind::Skill => &mut self.hide_skill,
            FilterKind::Drill => &mut self.hide_drill,
            FilterKind::Secrets => &mut self.hide_secrets,
            FilterKind::Tickers => &mut self.hide_tickers,
            FilterKind::RiftTime => &mut self.hide_rift_time,
            FilterKind::Location => &mut self.hide_location,
            FilterKind::Pressure => &mut self.hide_pressure,
        };
        *flag = true;
    }
}

impl Config {
    /// Load config.toml from the data directory, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::info!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load config from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        Self::parse(&contents).context(format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Write the config as pretty TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {:?}", parent))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context(format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Get the base directory (~/.actionbar/)
    /// Can be overridden with ACTIONBAR_DIR environment variable
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var("ACTIONBAR_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".actionbar"))
    }

    /// Returns: ~/.actionbar/config.toml
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
